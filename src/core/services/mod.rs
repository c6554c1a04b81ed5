pub mod config_resolver;
pub mod name_rules;
pub mod report_summary;
pub mod retry_resolver;
pub mod suite_planner;
