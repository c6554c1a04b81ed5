use std::path::PathBuf;

/// All domain errors for suiteconf.
///
/// Every variant aborts suite bootstrap. Messages carry enough context
/// (flag names, examples, valid alternatives) to fix the input without
/// reading the source.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Environment '{env}' not found\n\n  \
         Suiteconf searched for:\n    \
         {searched}\n\n  \
         Solutions:\n    \
         → Create the file: {env}.json with a \"services\" section\n    \
         → Or pick another environment: --env <name>\n    \
         → Run 'suiteconf services' to see available environments"
    )]
    ConfigNotFound { env: String, searched: String },

    #[error(
        "Invalid environment file {path}: {detail}\n\n  \
         Expected a JSON object (or TOML table) with a \"services\" mapping."
    )]
    InvalidEnvironmentFile { path: PathBuf, detail: String },

    #[error(
        "Invalid environment name '{name}'\n\n  \
         Environment names may only contain letters, digits, '_', '-' and '.'\n  \
         and must not start with a separator."
    )]
    InvalidEnvironmentName { name: String },

    #[error(
        "Missing service. Example: --service dummyjson \
         (check {env_file} > services)\n\n  \
         Solutions:\n    \
         → Pass it on the command line: --service <id>\n    \
         → Or set SUITE_SERVICE=<id>\n    \
         → Or configure a fallback: [suite] default_service in suite.toml"
    )]
    MissingService { env_file: String },

    #[error(
        "Unknown service=\"{service}\". Available: {available} \
         (check {env_file} > services)"
    )]
    UnknownService {
        service: String,
        available: String,
        env_file: String,
    },

    #[error(
        "Invalid retry configuration: {field}='{value}'\n\n  \
         {field} must be an integer {expected}.\n  \
         Example: --retries 3 --retry-interval 1000"
    )]
    InvalidRetryConfig {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(
        "Retry policy already registered for this run: {existing}\n\n  \
         The suite-wide retry default can only be set once per run."
    )]
    RetryAlreadyRegistered { existing: String },

    #[error(
        "Report folder not found: {path}\n\n  \
         Run the suite first, or point at the reports: suiteconf report <dir>"
    )]
    ReportInputNotFound { path: PathBuf },

    #[error(
        "No JUnit XML files found under: {path}\n\n  \
         The runner writes them next to karate-summary.html; check [runner] report_root."
    )]
    NoJUnitReports { path: PathBuf },

    #[error("Invalid JUnit report {path}: {detail}")]
    InvalidReport { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Failed to serialize resolved configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
