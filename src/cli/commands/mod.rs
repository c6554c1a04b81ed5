pub mod plan;
pub mod report;
pub mod resolve;
pub mod services;
