use std::sync::OnceLock;

use regex::Regex;

use crate::core::errors::{ConfigError, Result};

fn safe_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid name regex"))
}

/// Whether `name` is safe to use as a single path component.
pub fn is_safe_name(name: &str) -> bool {
    safe_name().is_match(name) && !name.contains("..")
}

/// Reject environment names that could escape the config directory.
pub fn validate_env_name(name: &str) -> Result<()> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvironmentName {
            name: name.to_string(),
        })
    }
}

/// Reject suite or service names that could escape the report directory.
pub fn validate_path_name(kind: &str, name: &str) -> Result<()> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidConfig {
            detail: format!(
                "{kind} name '{name}' may only contain letters, digits, '_', '-' and '.' \
                 and must not start with a separator"
            ),
        })
    }
}
