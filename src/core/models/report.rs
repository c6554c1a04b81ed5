use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        };
        f.write_str(label)
    }
}

/// Rolled-up outcome of a suite or of the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pass,
    Fail,
    /// Some executed tests failed, some passed.
    Unstable,
    NoTests,
    AllSkipped,
}

impl RunStatus {
    /// Roll counts up into one status. Failures count against executed
    /// (non-skipped) tests only.
    pub fn rollup(tests: u32, failed: u32, skipped: u32) -> Self {
        let executed = tests.saturating_sub(skipped);
        if tests == 0 {
            Self::NoTests
        } else if executed == 0 {
            Self::AllSkipped
        } else if failed == 0 {
            Self::Pass
        } else if failed >= executed {
            Self::Fail
        } else {
            Self::Unstable
        }
    }

    /// Whether the run needs attention (anything but a clean pass).
    pub fn is_healthy(self) -> bool {
        self == Self::Pass
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Unstable => "UNSTABLE",
            Self::NoTests => "NO TESTS",
            Self::AllSkipped => "ALL SKIPPED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub name: String,
    pub classname: String,
    pub time_sec: f64,
    pub status: CaseStatus,
    /// One-line failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// JUnit file the case was read from.
    pub source: PathBuf,
}

/// One `<testsuite>`, usually a feature file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    pub name: String,
    pub tests: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub time_sec: f64,
    pub status: RunStatus,
    pub cases: Vec<TestCaseResult>,
}

/// Suite, environment and service of a run, read back from the
/// `<report_root>/<suite>/<env>/<service>` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContext {
    pub suite: String,
    pub env: String,
    pub service: String,
}

impl Default for ReportContext {
    fn default() -> Self {
        Self {
            suite: "unknown".into(),
            env: "unknown".into(),
            service: "unknown".into(),
        }
    }
}

/// Executive summary of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub context: ReportContext,
    pub status: RunStatus,
    pub total_tests: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub time_sec: f64,
    /// Engine's own HTML report, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<PathBuf>,
    /// Most failing suites first.
    pub suites: Vec<SuiteResult>,
    /// Slowest failures first.
    pub failed_cases: Vec<TestCaseResult>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// `mm:ss`, or `h:mm:ss` from one hour up.
pub fn format_duration(seconds: f64) -> String {
    if seconds <= 0.0 || !seconds.is_finite() {
        return "00:00".to_string();
    }
    let total = seconds.round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Percentage with one decimal, `0%` for an empty total.
pub fn percent(part: u32, total: u32) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", 100.0 * f64::from(part) / f64::from(total))
}
