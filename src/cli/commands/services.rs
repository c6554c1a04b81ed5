use colored::Colorize;

use crate::adapters::sources::file_source::FileEnvironmentSource;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::traits::environment_source::EnvironmentSource;

/// Execute the `suiteconf services` command.
///
/// Lists the services of the selected environment with their base URLs,
/// followed by every environment found in the config directory.
pub fn execute(env: Option<&str>) -> Result<()> {
    let config_dir = crate::cli::context::config_dir();
    let config = AppConfig::load(config_dir)?;
    let env_name = crate::cli::context::env_or_default(env, &config.suite.default_env);

    let source = FileEnvironmentSource::new(config_dir);
    let file = source.load(env_name)?;

    output::header(&format!("Services in {}", source.describe(env_name)));

    match &file.services {
        Some(services) if !services.is_empty() => {
            for id in services.keys() {
                match file.usable_service(id) {
                    Some(svc) => println!(
                        "  {} {:<16} {}",
                        "✓".green(),
                        id,
                        svc.base_url().unwrap_or_default().cyan()
                    ),
                    None => println!(
                        "  {} {:<16} {}",
                        "✗".red(),
                        id,
                        "(no baseUrl, unusable)".dimmed()
                    ),
                }
            }
        }
        _ => output::warning("No services defined"),
    }

    if let Some(fallback) = &config.suite.default_service {
        println!("\n  Default service: {}", fallback.cyan());
    }

    println!("\n{}", "  Environments".bold());
    for name in source.available()? {
        let marker = if name == env_name { "•".green() } else { "•".dimmed() };
        println!("  {marker} {name}");
    }

    Ok(())
}
