use std::sync::OnceLock;

use regex::Regex;

use crate::config::app_config::RunnerSection;
use crate::core::errors::{ConfigError, Result};
use crate::core::models::suite_plan::SuitePlan;
use crate::core::services::name_rules::{validate_env_name, validate_path_name};

/// Tag prefix that binds scenarios to a service.
const SERVICE_TAG_PREFIX: &str = "@svc_";

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\s]+").expect("valid separator regex"))
}

fn boolean_keywords() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(^|\s)(and|or|not)(\s|$)").expect("valid keyword regex"))
}

/// Inputs for planning one suite run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanInput {
    /// Suite name or tag, e.g. `smoke` or `@smoke`.
    pub suite: String,
    pub environment: String,
    pub service: Option<String>,
    /// Extra tag filter, e.g. `@login ~@wip` or `~@wip and ~@quarantine`.
    pub tags: Option<String>,
    /// Overrides `runner.threads` from the project file.
    pub threads: Option<u32>,
}

/// Builds the runner invocation for a suite: tag filter, report
/// directory and worker count.
pub struct SuitePlanner {
    /// Whether a plan without a service is an error.
    pub require_service: bool,
}

impl SuitePlanner {
    /// Plan a suite run.
    ///
    /// Tags are ordered suite tag, extra tags, service tag. Reports go to
    /// `<report_root>/<suite>/<env>/<service|all>` so concurrent jobs never
    /// overwrite each other.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a blank suite name, a suite or service name
    ///   that is not a single path component, or zero threads.
    /// - `InvalidEnvironmentName` for a path-like environment.
    /// - `MissingService` when a service is required but absent.
    pub fn plan(&self, input: &PlanInput, runner: &RunnerSection) -> Result<SuitePlan> {
        let suite = input.suite.trim().trim_start_matches('@');
        if suite.is_empty() {
            return Err(ConfigError::InvalidConfig {
                detail: "suite name must not be empty (e.g. smoke, regression)".into(),
            });
        }
        validate_path_name("suite", suite)?;
        validate_env_name(&input.environment)?;

        let service = input
            .service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if self.require_service && service.is_none() {
            return Err(ConfigError::MissingService {
                env_file: format!("{}.json", input.environment),
            });
        }
        if let Some(svc) = service {
            validate_path_name("service", svc)?;
        }

        let threads = input.threads.unwrap_or(runner.threads);
        if threads == 0 {
            return Err(ConfigError::InvalidConfig {
                detail: "threads must be at least 1".into(),
            });
        }

        let mut tags = vec![format!("@{suite}")];
        if let Some(expr) = input.tags.as_deref() {
            tags.extend(Self::split_tags(expr));
        }
        if let Some(svc) = service {
            tags.push(format!("{SERVICE_TAG_PREFIX}{svc}"));
        }

        let report_dir = format!(
            "{}/{suite}/{}/{}",
            runner.report_root.trim_end_matches('/'),
            input.environment,
            service.unwrap_or("all")
        );

        Ok(SuitePlan {
            suite: suite.to_string(),
            env: input.environment.clone(),
            service: service.map(str::to_string),
            tags,
            report_dir,
            features_path: runner.features_path.clone(),
            threads,
            started_at: chrono::Utc::now(),
        })
    }

    /// Split an extra tag filter into runner tags.
    ///
    /// Boolean expressions stay whole so `~@wip and ~@quarantine` keeps
    /// its meaning; plain lists split on commas and whitespace.
    pub fn split_tags(expr: &str) -> Vec<String> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Vec::new();
        }
        if boolean_keywords().is_match(expr) {
            return vec![expr.to_string()];
        }
        separators()
            .split(expr)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
