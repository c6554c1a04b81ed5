use serde::Serialize;

/// Everything the runner needs to launch one suite: which scenarios
/// to select, where to write reports and how many workers to use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitePlan {
    pub suite: String,
    pub env: String,
    pub service: Option<String>,
    pub tags: Vec<String>,
    pub report_dir: String,
    pub features_path: String,
    pub threads: u32,
    pub started_at: chrono::DateTime<chrono::Utc>,
}
