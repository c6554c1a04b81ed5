use crate::adapters::registry::once_registry;
use crate::adapters::sources::file_source::FileEnvironmentSource;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::retry::RetryPolicy;
use crate::core::models::setting::RawSetting;
use crate::core::services::config_resolver::{self, ConfigResolver, ResolveInput};
use crate::core::services::retry_resolver::RetryInputs;
use crate::core::traits::retry_registry::RetryRegistry;

/// Command-line options of `suiteconf resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions<'a> {
    pub env: Option<&'a str>,
    pub service: Option<&'a str>,
    pub retries: Option<&'a str>,
    pub retry_interval: Option<&'a str>,
    pub policy: Option<RetryPolicy>,
    pub default_service: Option<&'a str>,
    pub output: Option<&'a str>,
    pub compact: bool,
}

/// Execute the `suiteconf resolve` command.
///
/// Loads `suite.toml` (if any), resolves the environment and service,
/// registers the retry default and prints the resolved configuration
/// as JSON, or writes it to `--output`.
pub fn execute(opts: &ResolveOptions<'_>) -> Result<()> {
    let config_dir = crate::cli::context::config_dir();
    let config = AppConfig::load(config_dir)?;

    let resolver = ConfigResolver {
        retry_policy: opts.policy.unwrap_or(config.suite.retry_policy),
        default_service: opts
            .default_service
            .map(str::to_string)
            .or(config.suite.default_service.clone()),
    };

    let input = ResolveInput {
        environment: Some(
            crate::cli::context::env_or_default(opts.env, &config.suite.default_env).to_string(),
        ),
        service: opts.service.map(str::to_string),
        retry: RetryInputs {
            count: opts.retries.map(RawSetting::from),
            interval: opts.retry_interval.map(RawSetting::from),
            namespaced_count: config.retry.count.clone(),
            namespaced_interval: config.retry.interval.clone(),
        },
    };

    let source = FileEnvironmentSource::new(config_dir);
    let resolved = resolver.resolve(&input, &source, Some(once_registry::global()))?;
    let json = config_resolver::to_json(&resolved, !opts.compact)?;

    match opts.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            output::success(&format!(
                "Resolved env={} service={} baseUrl={}",
                resolved.env, resolved.service, resolved.base_url
            ));
            if let Some(retry) = once_registry::global().current() {
                output::success(&format!("Retry policy ({}): {retry}", resolver.retry_policy));
            }
            output::success(&format!("Written to {path}"));
        }
        None => println!("{json}"),
    }

    Ok(())
}
