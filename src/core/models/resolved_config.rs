use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::environment_file::ServiceConfig;
use super::retry::RetrySettings;

/// Headers every scenario sends unless it overrides them.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build the fixed `commonHeaders` mapping.
pub fn common_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
    ])
}

/// The configuration object handed to the test engine.
///
/// Built once per run and never mutated afterwards. Serializes to the
/// camelCase document scenarios read (`baseUrl`, `commonHeaders`, ...),
/// with the environment file's other fields alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub env: String,
    pub common_headers: BTreeMap<String, String>,
    pub service: String,
    pub base_url: String,
    pub service_config: ServiceConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetrySettings>,
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}
