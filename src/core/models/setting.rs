use serde::{Deserialize, Serialize};

/// A numeric setting as supplied by a caller or a config file.
///
/// Command-line flags and environment variables arrive as text, while
/// `suite.toml` may hold a real integer. Parsing is deferred to the
/// retry policy so each policy can decide how to treat bad input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSetting {
    Int(i64),
    Text(String),
}

impl RawSetting {
    /// Parse the setting as a signed integer, trimming text first.
    pub fn parse_i64(&self) -> Option<i64> {
        match self {
            RawSetting::Int(n) => Some(*n),
            RawSetting::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for RawSetting {
    fn from(s: &str) -> Self {
        RawSetting::Text(s.to_string())
    }
}

impl From<String> for RawSetting {
    fn from(s: String) -> Self {
        RawSetting::Text(s)
    }
}

impl From<i64> for RawSetting {
    fn from(n: i64) -> Self {
        RawSetting::Int(n)
    }
}

impl std::fmt::Display for RawSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawSetting::Int(n) => write!(f, "{n}"),
            RawSetting::Text(s) => write!(f, "{s}"),
        }
    }
}
