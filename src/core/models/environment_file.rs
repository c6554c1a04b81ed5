use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loaded environment file (e.g. `config/dev.json`).
///
/// Only `services` is interpreted. Every other top-level field is kept
/// as-is and handed through to the resolved configuration so scenarios
/// can read it.
///
/// Service entries stay raw JSON until one is selected, so a malformed
/// sibling entry never makes the whole file unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnvironmentFile {
    /// Look up a service that is usable: an object with a non-blank
    /// string `baseUrl`.
    pub fn usable_service(&self, id: &str) -> Option<ServiceConfig> {
        let entry = self.services.as_ref()?.get(id)?;
        if !entry.is_object() {
            return None;
        }
        serde_json::from_value::<ServiceConfig>(entry.clone())
            .ok()
            .filter(|svc| svc.base_url().is_some())
    }

    /// Comma-separated service ids, or `(none)` when there are none.
    pub fn available_services(&self) -> String {
        match &self.services {
            Some(services) if !services.is_empty() => {
                let mut ids: Vec<_> = services.keys().map(String::as_str).collect();
                ids.sort_unstable();
                ids.join(", ")
            }
            _ => "(none)".to_string(),
        }
    }
}

/// One entry of the `services` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(rename = "baseUrl", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceConfig {
    /// The base URL, if present and not blank.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
