pub mod once_registry;
