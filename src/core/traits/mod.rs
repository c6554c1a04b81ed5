pub mod environment_source;
pub mod retry_registry;
