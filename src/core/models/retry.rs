use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The (count, interval) pair handed to the engine's "retry until"
/// construct. `interval` is in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    pub count: u32,
    pub interval: u64,
}

impl std::fmt::Display for RetrySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "count={} interval={}ms", self.count, self.interval)
    }
}

/// How retry inputs are turned into `RetrySettings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryPolicy {
    /// count >= 1 (default 1), interval >= 0 (default 1000). Bad input fails.
    #[default]
    Strict,
    /// count >= 0 (default 0), interval >= 0 (default 1000). Bad input
    /// falls back to the default.
    Lenient,
    /// No retry configuration at all.
    None,
}

impl FromStr for RetryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RetryPolicy::Strict),
            "lenient" => Ok(RetryPolicy::Lenient),
            "none" | "off" => Ok(RetryPolicy::None),
            other => Err(format!(
                "unknown retry policy '{other}' (expected strict, lenient or none)"
            )),
        }
    }
}

impl std::fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RetryPolicy::Strict => "strict",
            RetryPolicy::Lenient => "lenient",
            RetryPolicy::None => "none",
        };
        f.write_str(name)
    }
}
