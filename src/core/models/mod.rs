pub mod environment_file;
pub mod report;
pub mod resolved_config;
pub mod retry;
pub mod setting;
pub mod suite_plan;
