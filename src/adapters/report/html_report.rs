use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use crate::core::models::report::{CaseStatus, ReportSummary, RunStatus, format_duration, percent};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f6f7f9;color:#1f2933;margin:0}
.container{max-width:1100px;margin:0 auto;padding:24px}
h1{margin:0 0 4px;font-size:22px}.sub{color:#616e7c;margin:0 0 20px}
.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(150px,1fr));gap:12px;margin-bottom:20px}
.card{background:#fff;border:1px solid #e4e7eb;border-radius:8px;padding:12px}
.card .label{margin:0;color:#616e7c;font-size:12px;text-transform:uppercase}
.card .value{margin:4px 0;font-size:24px;font-weight:600}.card .hint{margin:0;color:#9aa5b1;font-size:12px}
.pill{display:inline-block;padding:2px 8px;border-radius:10px;font-size:12px;font-weight:600}
.ok{background:#e3f9e5;color:#207227}.bad{background:#ffe3e3;color:#a61b1b}.warn{background:#fff3c4;color:#8d6708}
table{width:100%;border-collapse:collapse;background:#fff;margin:8px 0 20px}
th,td{text-align:left;padding:6px 10px;border-bottom:1px solid #e4e7eb;font-size:14px;vertical-align:top}
details.suite{margin-bottom:12px}summary{cursor:pointer;font-weight:600}
pre.details{white-space:pre-wrap;font-size:12px;background:#f5f7fa;padding:8px}
.muted{color:#9aa5b1}.footer{color:#9aa5b1;font-size:12px;margin-top:24px}";

/// Render a self-contained HTML page for `summary`, to be written at
/// `output_file` (used to link the evidence report relatively).
pub fn render(summary: &ReportSummary, output_file: &Path) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let ctx = &summary.context;

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n");
    html.push_str("<title>API Test Executive Summary</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n<div class=\"container\">\n");

    let _ = writeln!(
        html,
        "<h1>API Test Executive Summary <span class=\"pill {}\">{}</span></h1>",
        pill_class(summary.status),
        escape(&summary.status.to_string())
    );
    let _ = writeln!(
        html,
        "<p class=\"sub\">Suite: <b>{}</b> &middot; Env: <b>{}</b> &middot; Service: <b>{}</b> &middot; Generated: {}</p>",
        escape(&ctx.suite),
        escape(&ctx.env),
        escape(&ctx.service),
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    html.push_str("<div class=\"cards\">");
    let total = summary.total_tests;
    card(&mut html, "Total", &total.to_string(), "test cases");
    card(&mut html, "Passed", &summary.passed.to_string(), &percent(summary.passed, total));
    card(&mut html, "Failed", &summary.failed.to_string(), &percent(summary.failed, total));
    card(&mut html, "Skipped", &summary.skipped.to_string(), &percent(summary.skipped, total));
    card(&mut html, "Duration", &format_duration(summary.time_sec), "sum of suites");
    html.push_str("</div>\n");

    if let Some(evidence) = summary.evidence.as_deref().filter(|p| p.is_file()) {
        let from = output_file.parent().unwrap_or(Path::new(""));
        let _ = writeln!(
            html,
            "<p>Evidence: <a href=\"{}\">engine report</a></p>",
            escape_attr(&relative_href(from, evidence))
        );
    }

    if !summary.failed_cases.is_empty() {
        html.push_str("<h2>Failures</h2>\n<table><thead><tr><th>Scenario</th><th>Duration</th><th>Reason</th></tr></thead><tbody>");
        for case in &summary.failed_cases {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&case.name),
                format_duration(case.time_sec),
                escape(case.message.as_deref().unwrap_or("(no message)"))
            );
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("<h2>Results per feature</h2>\n");
    for suite in &summary.suites {
        let _ = write!(
            html,
            "<details class=\"suite\" open><summary>{} <span class=\"pill {}\">{}</span> \
             <span class=\"muted\">P {} &middot; F {} &middot; S {} &middot; {}</span></summary>",
            escape(&suite.name),
            pill_class(suite.status),
            escape(&suite.status.to_string()),
            suite.passed,
            suite.failed,
            suite.skipped,
            format_duration(suite.time_sec)
        );
        html.push_str("<table><thead><tr><th>Status</th><th>Scenario</th><th>Duration</th><th>Reason (only if failed)</th></tr></thead><tbody>");
        for case in &suite.cases {
            let class = match case.status {
                CaseStatus::Pass => "ok",
                CaseStatus::Fail => "bad",
                CaseStatus::Skip => "warn",
            };
            let _ = write!(
                html,
                "<tr><td><span class=\"pill {class}\">{}</span></td><td>{}</td><td>{}</td><td>",
                case.status,
                escape(&case.name),
                format_duration(case.time_sec)
            );
            if case.status == CaseStatus::Fail {
                let _ = write!(
                    html,
                    "<div>{}</div>",
                    escape(case.message.as_deref().unwrap_or("(no message)"))
                );
                if let Some(details) = &case.details {
                    let _ = write!(
                        html,
                        "<details><summary>Details</summary><pre class=\"details\">{}</pre></details>",
                        escape(details)
                    );
                }
            } else {
                html.push_str("<span class=\"muted\">-</span>");
            }
            html.push_str("</td></tr>");
        }
        html.push_str("</tbody></table></details>\n");
    }

    html.push_str("<div class=\"footer\">Generated by suiteconf report</div>\n</div>\n</body>\n</html>\n");
    html
}

fn card(html: &mut String, label: &str, value: &str, hint: &str) {
    let _ = write!(
        html,
        "<div class=\"card\"><p class=\"label\">{}</p><p class=\"value\">{}</p><p class=\"hint\">{}</p></div>",
        escape(label),
        escape(value),
        escape(hint)
    );
}

fn pill_class(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Pass => "ok",
        RunStatus::Fail => "bad",
        RunStatus::Unstable | RunStatus::NoTests | RunStatus::AllSkipped => "warn",
    }
}

/// Escape text for HTML element content.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape(s).replace('\'', "&#39;")
}

/// Path of `to` relative to the directory `from`, with `/` separators.
/// Falls back to `to` itself when either path cannot be made absolute.
fn relative_href(from: &Path, to: &Path) -> String {
    let (Ok(from_abs), Ok(to_abs)) = (std::path::absolute(from), std::path::absolute(to)) else {
        return to.to_string_lossy().replace('\\', "/");
    };
    let from_parts = normalized(&from_abs);
    let to_parts = normalized(&to_abs);

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part);
    }
    rel.to_string_lossy().replace('\\', "/")
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts
}
