use std::path::Path;

use colored::Colorize;

use crate::adapters::report::html_report;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::report::{RunStatus, format_duration};
use crate::core::services::report_summary::ReportSummarizer;

/// Failures listed in the console summary.
const CONSOLE_FAILURES: usize = 10;

/// Execute the `suiteconf report [input]` command.
///
/// Summarizes the JUnit XML under `input` (default `[runner] report_root`).
/// `--output` writes an HTML page for `.html`/`.htm` paths and JSON
/// otherwise; `--json` prints the JSON summary to stdout.
pub fn execute(input: Option<&str>, output_path: Option<&str>, json: bool) -> Result<()> {
    let config = AppConfig::load(crate::cli::context::config_dir())?;
    let input_dir = Path::new(input.unwrap_or(&config.runner.report_root));

    let summary = ReportSummarizer.summarize(input_dir)?;

    if let Some(path) = output_path {
        let path = Path::new(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
        let body = if is_html {
            html_report::render(&summary, path)
        } else {
            format!("{}\n", serde_json::to_string_pretty(&summary)?)
        };
        std::fs::write(path, body)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let ctx = &summary.context;
    output::header(&format!(
        "Executive summary: {} · {} · {}",
        ctx.suite, ctx.env, ctx.service
    ));
    let label = summary.status.to_string();
    let status = match summary.status {
        RunStatus::Pass => label.as_str().green(),
        RunStatus::Fail => label.as_str().red(),
        _ => label.as_str().yellow(),
    };
    println!("  Status:   {}", status.bold());
    println!("  Tests:    {}", summary.total_tests);
    println!("  Passed:   {}", summary.passed);
    println!("  Failed:   {}", summary.failed);
    println!("  Skipped:  {}", summary.skipped);
    println!("  Duration: {}", format_duration(summary.time_sec));
    if let Some(evidence) = &summary.evidence {
        println!("  Evidence: {}", evidence.display().to_string().dimmed());
    }

    if !summary.status.is_healthy() && !summary.failed_cases.is_empty() {
        println!("\n{}", "  Failures".bold());
        for case in summary.failed_cases.iter().take(CONSOLE_FAILURES) {
            println!(
                "  {} {} {}",
                "✗".red(),
                case.name,
                case.message.as_deref().unwrap_or("(no message)").dimmed()
            );
        }
        let more = summary.failed_cases.len().saturating_sub(CONSOLE_FAILURES);
        if more > 0 {
            println!("  {}", format!("... and {more} more").dimmed());
        }
    }

    if let Some(path) = output_path {
        output::success(&format!("Written to {path}"));
    }

    Ok(())
}
