use colored::Colorize;

use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::name_rules::validate_env_name;
use crate::core::services::suite_planner::{PlanInput, SuitePlanner};

/// Execute the `suiteconf plan <suite>` command.
///
/// A service is required unless `suite.toml` names a default service,
/// matching how `resolve` treats a missing service.
pub fn execute(
    env: Option<&str>,
    suite: &str,
    service: Option<&str>,
    tags: Option<&str>,
    threads: Option<u32>,
    json: bool,
) -> Result<()> {
    let config_dir = crate::cli::context::config_dir();
    let config = AppConfig::load(config_dir)?;
    let env_name = crate::cli::context::env_or_default(env, &config.suite.default_env);
    validate_env_name(env_name)?;

    let service = service
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(config.suite.default_service.as_deref());

    let planner = SuitePlanner {
        require_service: config.suite.default_service.is_none(),
    };
    let input = PlanInput {
        suite: suite.to_string(),
        environment: env_name.to_string(),
        service: service.map(str::to_string),
        tags: tags.map(str::to_string),
        threads,
    };
    let plan = planner.plan(&input, &config.runner)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    output::header(&format!("Suite plan: {}", plan.suite));
    println!("  Env:      {}", plan.env.cyan());
    println!(
        "  Service:  {}",
        plan.service.as_deref().unwrap_or("(all)").cyan()
    );
    println!("  Tags:     {}", plan.tags.join(" "));
    println!("  Features: {}", plan.features_path);
    println!("  Reports:  {}", plan.report_dir);
    println!("  Threads:  {}", plan.threads);
    println!("  Started:  {}", plan.started_at.to_rfc3339().dimmed());

    Ok(())
}
