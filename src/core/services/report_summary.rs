use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::errors::{ConfigError, Result};
use crate::core::models::report::{
    CaseStatus, ReportContext, ReportSummary, RunStatus, SuiteResult, TestCaseResult,
};

/// Engine report linked from the summary as evidence.
pub const EVIDENCE_FILE: &str = "karate-summary.html";

const MESSAGE_MAX: usize = 160;
const DETAILS_MAX: usize = 1200;

/// Builds an executive summary from the JUnit XML files a suite run
/// left under its report directory.
pub struct ReportSummarizer;

impl ReportSummarizer {
    /// Walk `input_dir`, parse every `*.xml` and roll the results up.
    ///
    /// # Errors
    ///
    /// - `ReportInputNotFound` if `input_dir` does not exist.
    /// - `NoJUnitReports` if it holds no XML file.
    /// - `InvalidReport` if an XML file cannot be parsed.
    pub fn summarize(&self, input_dir: &Path) -> Result<ReportSummary> {
        if !input_dir.exists() {
            return Err(ConfigError::ReportInputNotFound {
                path: input_dir.to_path_buf(),
            });
        }

        let mut xml_files = Vec::new();
        let mut evidence = None;
        for entry in WalkDir::new(input_dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.to_ascii_lowercase().ends_with(".xml") {
                xml_files.push(entry.path().to_path_buf());
            } else if evidence.is_none() && name.eq_ignore_ascii_case(EVIDENCE_FILE) {
                evidence = Some(entry.path().to_path_buf());
            }
        }
        if xml_files.is_empty() {
            return Err(ConfigError::NoJUnitReports {
                path: input_dir.to_path_buf(),
            });
        }

        let context = evidence
            .as_deref()
            .or(xml_files.first().map(PathBuf::as_path))
            .and_then(Path::parent)
            .and_then(|dir| Self::context_from_path(input_dir, dir))
            .unwrap_or_default();

        let mut suites = Vec::new();
        for path in &xml_files {
            tracing::debug!(path = %path.display(), "parsing JUnit report");
            let content = std::fs::read_to_string(path)?;
            let parsed = Self::parse_junit(&content, path).map_err(|detail| {
                ConfigError::InvalidReport {
                    path: path.clone(),
                    detail,
                }
            })?;
            suites.extend(parsed);
        }

        let summary = Self::roll_up(context, evidence, suites);
        tracing::info!(
            files = xml_files.len(),
            tests = summary.total_tests,
            failed = summary.failed,
            status = %summary.status,
            "report summarized"
        );
        Ok(summary)
    }

    /// Parse one JUnit document. A `<testsuite>` root is one suite; any
    /// other root (usually `<testsuites>`) contributes every nested
    /// `<testsuite>`. Suites without tests are dropped.
    pub fn parse_junit(xml: &str, source: &Path) -> std::result::Result<Vec<SuiteResult>, String> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| e.to_string())?;
        let root = doc.root_element();

        let suite_nodes: Vec<_> = if is_tag(root, "testsuite") {
            vec![root]
        } else {
            root.descendants().filter(|n| is_tag(*n, "testsuite")).collect()
        };

        Ok(suite_nodes
            .into_iter()
            .map(|node| Self::parse_suite(node, source))
            .filter(|suite| suite.tests > 0)
            .collect())
    }

    fn parse_suite(node: roxmltree::Node<'_, '_>, source: &Path) -> SuiteResult {
        let name = match node.attribute("name").map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => source
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let cases: Vec<_> = node
            .descendants()
            .filter(|n| is_tag(*n, "testcase"))
            .map(|n| Self::parse_case(n, source))
            .collect();

        let mut tests = u32_attr(node, "tests");
        if tests == 0 {
            tests = u32::try_from(cases.len()).unwrap_or(u32::MAX);
        }
        let failed = u32_attr(node, "failures").saturating_add(u32_attr(node, "errors"));
        let skipped = u32_attr(node, "skipped");

        SuiteResult {
            name,
            tests,
            passed: tests.saturating_sub(failed).saturating_sub(skipped),
            failed,
            skipped,
            time_sec: f64_attr(node, "time"),
            status: RunStatus::rollup(tests, failed, skipped),
            cases,
        }
    }

    fn parse_case(node: roxmltree::Node<'_, '_>, source: &Path) -> TestCaseResult {
        let child = |tag: &str| node.descendants().find(|n| is_tag(*n, tag));
        let (status, outcome) = if let Some(skip) = child("skipped") {
            (CaseStatus::Skip, Some(skip))
        } else if let Some(failure) = child("failure").or_else(|| child("error")) {
            (CaseStatus::Fail, Some(failure))
        } else {
            (CaseStatus::Pass, None)
        };

        let (message, details) = match outcome {
            Some(el) => {
                let text = text_content(el);
                let message = [el.attribute("message").unwrap_or_default(), text.as_str()]
                    .into_iter()
                    .find(|s| !s.trim().is_empty())
                    .map(|s| one_line(s, MESSAGE_MAX));
                let details = Some(truncate(text.trim(), DETAILS_MAX)).filter(|d| !d.is_empty());
                (message, details)
            }
            None => (None, None),
        };

        TestCaseResult {
            name: node.attribute("name").unwrap_or_default().trim().to_string(),
            classname: node.attribute("classname").unwrap_or_default().trim().to_string(),
            time_sec: f64_attr(node, "time"),
            status,
            message,
            details,
            source: source.to_path_buf(),
        }
    }

    /// Totals, ordering and overall status for a set of parsed suites.
    pub fn roll_up(
        context: ReportContext,
        evidence: Option<PathBuf>,
        mut suites: Vec<SuiteResult>,
    ) -> ReportSummary {
        let (mut total_tests, mut passed, mut failed, mut skipped) = (0u32, 0u32, 0u32, 0u32);
        let mut time_sec = 0.0;
        for suite in &suites {
            total_tests = total_tests.saturating_add(suite.tests);
            passed = passed.saturating_add(suite.passed);
            failed = failed.saturating_add(suite.failed);
            skipped = skipped.saturating_add(suite.skipped);
            time_sec += suite.time_sec;
        }

        let mut failed_cases: Vec<_> = suites
            .iter()
            .flat_map(|s| &s.cases)
            .filter(|c| c.status == CaseStatus::Fail)
            .cloned()
            .collect();
        failed_cases.sort_by(|a, b| b.time_sec.total_cmp(&a.time_sec).then_with(|| a.name.cmp(&b.name)));
        suites.sort_by(|a, b| b.failed.cmp(&a.failed).then_with(|| a.name.cmp(&b.name)));

        ReportSummary {
            context,
            status: RunStatus::rollup(total_tests, failed, skipped),
            total_tests,
            passed,
            failed,
            skipped,
            time_sec,
            evidence,
            suites,
            failed_cases,
            generated_at: chrono::Utc::now(),
        }
    }

    /// `<root>/<suite>/<env>/<service>[/...]` to a context; `None` when
    /// `dir` is not at least three levels below `root`.
    pub fn context_from_path(root: &Path, dir: &Path) -> Option<ReportContext> {
        let rel = dir.strip_prefix(root).ok()?;
        let mut parts = rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned());
        Some(ReportContext {
            suite: parts.next()?,
            env: parts.next()?,
            service: parts.next()?,
        })
    }
}

fn is_tag(node: roxmltree::Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(tag)
}

/// Attribute as a count; missing, negative or garbled values count as 0.
fn u32_attr(node: roxmltree::Node<'_, '_>, name: &str) -> u32 {
    node.attribute(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn f64_attr(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn text_content(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Cut to `max` characters, ending in `...` when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn one_line(s: &str, max: usize) -> String {
    truncate(&s.split_whitespace().collect::<Vec<_>>().join(" "), max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITES_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="features/login.feature" tests="3" failures="1" errors="0" skipped="1" time="4.5">
    <testcase name="valid login" classname="login" time="1.0"/>
    <testcase name="locked account" classname="login" time="3.0">
      <failure message="status code was: 500, expected: 200">match failed
        at line 12</failure>
    </testcase>
    <testcase name="sso" classname="login" time="0.5"><skipped/></testcase>
  </testsuite>
  <testsuite name="features/cart.feature" tests="2" failures="0" errors="1" time="2">
    <testcase name="add item" time="0.5"/>
    <testcase name="checkout" time="1.5"><error><![CDATA[timeout after 1500ms]]></error></testcase>
  </testsuite>
  <testsuite name="features/empty.feature" tests="0"/>
</testsuites>"#;

    fn parse(xml: &str) -> Vec<SuiteResult> {
        ReportSummarizer::parse_junit(xml, Path::new("reports/TEST-x.xml")).unwrap()
    }

    #[test]
    fn testsuites_root_parses_every_suite_with_tests() {
        let suites = parse(SUITES_DOC);

        assert_eq!(suites.len(), 2);
        let login = &suites[0];
        assert_eq!(login.name, "features/login.feature");
        assert_eq!((login.tests, login.passed, login.failed, login.skipped), (3, 1, 1, 1));
        assert_eq!(login.status, RunStatus::Unstable);
        assert_eq!(suites[1].failed, 1);
    }

    #[test]
    fn case_status_and_message() {
        let suites = parse(SUITES_DOC);
        let cases = &suites[0].cases;

        assert_eq!(cases[0].status, CaseStatus::Pass);
        assert_eq!(cases[0].message, None);
        assert_eq!(cases[1].status, CaseStatus::Fail);
        assert_eq!(
            cases[1].message.as_deref(),
            Some("status code was: 500, expected: 200")
        );
        assert_eq!(cases[1].details.as_deref(), Some("match failed\n        at line 12"));
        assert_eq!(cases[2].status, CaseStatus::Skip);
    }

    #[test]
    fn error_text_used_when_message_missing() {
        let suites = parse(SUITES_DOC);
        let checkout = &suites[1].cases[1];

        assert_eq!(checkout.status, CaseStatus::Fail);
        assert_eq!(checkout.message.as_deref(), Some("timeout after 1500ms"));
    }

    #[test]
    fn single_testsuite_root_counts_cases_when_tests_missing() {
        let suites = parse(
            r#"<testsuite><testcase name="a"/><testcase name="b"><failure/></testcase></testsuite>"#,
        );

        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "TEST-x.xml");
        assert_eq!(suites[0].tests, 2);
        assert_eq!(suites[0].cases[1].status, CaseStatus::Fail);
    }

    #[test]
    fn garbled_counts_default_to_zero() {
        let suites = parse(
            r#"<testsuite name="s" tests=" 2 " failures="x" skipped="-1" time="abc">
                 <testcase name="a"/><testcase name="b"/></testsuite>"#,
        );

        assert_eq!((suites[0].tests, suites[0].failed, suites[0].skipped), (2, 0, 0));
        assert_eq!(suites[0].time_sec, 0.0);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(ReportSummarizer::parse_junit("<testsuite>", Path::new("a.xml")).is_err());
    }

    #[test]
    fn long_messages_are_trimmed() {
        let long = "word ".repeat(100);
        let line = one_line(&long, MESSAGE_MAX);

        assert_eq!(line.chars().count(), MESSAGE_MAX);
        assert!(line.ends_with("..."));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn roll_up_orders_failures() {
        let summary = ReportSummarizer::roll_up(ReportContext::default(), None, parse(SUITES_DOC));

        assert_eq!(summary.total_tests, 5);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.time_sec, 6.5);
        assert_eq!(summary.status, RunStatus::Unstable);
        let slowest: Vec<_> = summary.failed_cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(slowest, vec!["locked account", "checkout"]);
        // equal failure counts fall back to name order
        assert_eq!(summary.suites[0].name, "features/cart.feature");
    }

    #[test]
    fn context_needs_three_levels() {
        let root = Path::new("target/karate-reports");

        let ctx = ReportSummarizer::context_from_path(root, &root.join("smoke/dev/dummyjson/html"))
            .unwrap();
        assert_eq!((ctx.suite.as_str(), ctx.env.as_str(), ctx.service.as_str()), ("smoke", "dev", "dummyjson"));
        assert!(ReportSummarizer::context_from_path(root, &root.join("smoke/dev")).is_none());
    }

    #[test]
    fn summarize_walks_report_tree() {
        let dir = tempfile::tempdir().unwrap();
        let run = dir.path().join("smoke/dev/dummyjson");
        std::fs::create_dir_all(&run).unwrap();
        std::fs::write(run.join("TEST-login.xml"), SUITES_DOC).unwrap();
        std::fs::write(run.join("karate-summary.html"), "<html/>").unwrap();

        let summary = ReportSummarizer.summarize(dir.path()).unwrap();

        assert_eq!(summary.context.suite, "smoke");
        assert_eq!(summary.context.service, "dummyjson");
        assert_eq!(summary.evidence, Some(run.join("karate-summary.html")));
        assert_eq!(summary.total_tests, 5);
    }

    #[test]
    fn summarize_missing_or_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = ReportSummarizer.summarize(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::ReportInputNotFound { .. }));

        let err = ReportSummarizer.summarize(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoJUnitReports { .. }));
    }

    #[test]
    fn summarize_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("TEST-bad.xml"), "<testsuite").unwrap();

        let err = ReportSummarizer.summarize(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidReport { .. }));
        assert!(err.to_string().contains("TEST-bad.xml"));
    }
}
