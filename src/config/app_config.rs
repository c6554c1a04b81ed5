use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{ConfigError, Result};
use crate::core::models::retry::RetryPolicy;
use crate::core::models::setting::RawSetting;

/// File stem of the project settings file inside the config directory.
pub const PROJECT_FILE_STEM: &str = "suite";

/// Project-level settings read from `<config-dir>/suite.toml`.
///
/// The file is optional; every field has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub suite: SuiteSection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub runner: RunnerSection,
}

impl AppConfig {
    /// Load `suite.toml` from the config directory, or defaults if absent.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(format!("{PROJECT_FILE_STEM}.toml"));
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no project file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;

        crate::core::services::name_rules::validate_env_name(&config.suite.default_env)?;
        if config.runner.threads == 0 {
            return Err(ConfigError::InvalidConfig {
                detail: format!(
                    "runner.threads must be at least 1 (in {})",
                    config_path.display()
                ),
            });
        }

        Ok(config)
    }
}

/// The `[suite]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteSection {
    #[serde(default = "default_env")]
    pub default_env: String,
    /// Fallback service when none is requested. Unset = service required.
    pub default_service: Option<String>,
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for SuiteSection {
    fn default() -> Self {
        Self {
            default_env: default_env(),
            default_service: None,
            retry_policy: RetryPolicy::default(),
        }
    }
}

fn default_env() -> String {
    crate::core::services::config_resolver::DEFAULT_ENV.to_string()
}

/// The `[retry]` section: namespaced retry inputs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    pub count: Option<RawSetting>,
    pub interval: Option<RawSetting>,
}

/// The `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    #[serde(default = "default_threads")]
    pub threads: u32,
    #[serde(default = "default_features_path")]
    pub features_path: String,
    #[serde(default = "default_report_root")]
    pub report_root: String,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            features_path: default_features_path(),
            report_root: default_report_root(),
        }
    }
}

fn default_threads() -> u32 {
    5
}

fn default_features_path() -> String {
    "classpath:features/tests".to_string()
}

fn default_report_root() -> String {
    "target/karate-reports".to_string()
}
