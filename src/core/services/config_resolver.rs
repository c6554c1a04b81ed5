use serde_json::Value;

use crate::core::errors::{ConfigError, Result};
use crate::core::models::resolved_config::{ResolvedConfig, common_headers};
use crate::core::models::retry::RetryPolicy;
use crate::core::services::name_rules::validate_env_name;
use crate::core::services::retry_resolver::{RetryInputs, RetryResolver};
use crate::core::traits::environment_source::EnvironmentSource;
use crate::core::traits::retry_registry::RetryRegistry;

/// Environment used when the caller does not name one.
pub const DEFAULT_ENV: &str = "dev";

/// Keys the resolver sets itself; same-named fields from the environment
/// file are overridden.
const RESERVED_KEYS: &[&str] = &[
    "env",
    "commonHeaders",
    "service",
    "baseUrl",
    "serviceConfig",
    "retry",
];

/// Explicit inputs for one resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveInput {
    /// Environment name; `None` or blank means `dev`.
    pub environment: Option<String>,
    /// Requested service id; trimmed before use.
    pub service: Option<String>,
    pub retry: RetryInputs,
}

/// Selects an environment and a service and computes the retry policy.
///
/// A single linear validate-then-build pass: any failure aborts the
/// whole resolution, nothing is partially returned.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    pub retry_policy: RetryPolicy,
    /// Service used when none is requested. `None` makes the service
    /// mandatory.
    pub default_service: Option<String>,
}

impl ConfigResolver {
    /// Resolve the configuration for one test run.
    ///
    /// When `registry` is given and the policy yields retry settings,
    /// they are registered as the suite-wide default.
    ///
    /// # Errors
    ///
    /// - `InvalidEnvironmentName` if the name could escape the config
    ///   directory.
    /// - `ConfigNotFound` / `InvalidEnvironmentFile` from the source.
    /// - `MissingService` if no service was requested and there is no
    ///   default service.
    /// - `UnknownService` if the service is not in `services` or has no
    ///   `baseUrl`.
    /// - `InvalidRetryConfig` under the strict retry policy.
    pub fn resolve(
        &self,
        input: &ResolveInput,
        source: &dyn EnvironmentSource,
        registry: Option<&dyn RetryRegistry>,
    ) -> Result<ResolvedConfig> {
        let env = input
            .environment
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENV)
            .to_string();
        validate_env_name(&env)?;

        let file = source.load(&env)?;
        tracing::debug!(env = %env, location = %source.describe(&env), "environment file loaded");

        let service = self.select_service(input.service.as_deref(), || source.describe(&env))?;

        let service_config = file
            .usable_service(&service)
            .ok_or_else(|| ConfigError::UnknownService {
                service: service.clone(),
                available: file.available_services(),
                env_file: source.describe(&env),
            })?;
        // usable_service guarantees a non-blank baseUrl
        let base_url = service_config.base_url().unwrap_or_default().to_string();

        let retry = RetryResolver.resolve(self.retry_policy, &input.retry)?;
        if let (Some(settings), Some(registry)) = (&retry, registry) {
            registry.register(settings)?;
            tracing::debug!(%settings, "retry default registered");
        }

        let mut passthrough = file.extra;
        if let Some(services) = file.services {
            passthrough.insert("services".to_string(), Value::Object(services));
        }
        for key in RESERVED_KEYS {
            passthrough.remove(*key);
        }

        tracing::info!(
            env = %env,
            service = %service,
            base_url = %base_url,
            "configuration resolved"
        );

        Ok(ResolvedConfig {
            env,
            common_headers: common_headers(),
            service,
            base_url,
            service_config,
            retry,
            passthrough,
        })
    }

    /// Pick the service id: trimmed request, else the default service.
    fn select_service(
        &self,
        requested: Option<&str>,
        env_file: impl FnOnce() -> String,
    ) -> Result<String> {
        let requested = requested.map(str::trim).filter(|s| !s.is_empty());
        match (requested, self.default_service.as_deref()) {
            (Some(service), _) => Ok(service.to_string()),
            (None, Some(fallback)) => {
                tracing::debug!(service = fallback, "no service requested, using default");
                Ok(fallback.to_string())
            }
            (None, None) => Err(ConfigError::MissingService {
                env_file: env_file(),
            }),
        }
    }
}

/// Convenience for callers that only need the resolved document.
pub fn to_json(config: &ResolvedConfig, pretty: bool) -> Result<String> {
    let value: Value = serde_json::to_value(config)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::core::models::environment_file::EnvironmentFile;
    use crate::core::models::retry::RetrySettings;
    use crate::core::models::setting::RawSetting;

    /// In-memory source keyed by environment name.
    struct MapSource {
        files: HashMap<String, EnvironmentFile>,
        loads: Mutex<Vec<String>>,
    }

    impl MapSource {
        fn new(envs: &[(&str, &str)]) -> Self {
            let files = envs
                .iter()
                .map(|(name, json)| (name.to_string(), serde_json::from_str(json).unwrap()))
                .collect();
            Self {
                files,
                loads: Mutex::new(Vec::new()),
            }
        }
    }

    impl EnvironmentSource for MapSource {
        fn load(&self, env: &str) -> Result<EnvironmentFile> {
            self.loads.lock().unwrap().push(env.to_string());
            self.files
                .get(env)
                .cloned()
                .ok_or_else(|| ConfigError::ConfigNotFound {
                    env: env.to_string(),
                    searched: format!("memory:{env}"),
                })
        }

        fn describe(&self, env: &str) -> String {
            format!("config/{env}.json")
        }

        fn available(&self) -> Result<Vec<String>> {
            let mut names: Vec<_> = self.files.keys().cloned().collect();
            names.sort();
            Ok(names)
        }
    }

    #[derive(Default)]
    struct RecordingRegistry {
        registered: Mutex<Vec<RetrySettings>>,
    }

    impl RetryRegistry for RecordingRegistry {
        fn register(&self, settings: &RetrySettings) -> Result<()> {
            self.registered.lock().unwrap().push(*settings);
            Ok(())
        }

        fn current(&self) -> Option<RetrySettings> {
            self.registered.lock().unwrap().last().copied()
        }
    }

    const DEV: &str = r#"{"services": {"dummyjson": {"baseUrl": "https://dummyjson.test"}}}"#;

    fn dev_source() -> MapSource {
        MapSource::new(&[("dev", DEV)])
    }

    fn input(service: Option<&str>) -> ResolveInput {
        ResolveInput {
            service: service.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_known_service() {
        let cfg = ConfigResolver::default()
            .resolve(&input(Some("dummyjson")), &dev_source(), None)
            .unwrap();

        assert_eq!(cfg.env, "dev");
        assert_eq!(cfg.service, "dummyjson");
        assert_eq!(cfg.base_url, "https://dummyjson.test");
        assert_eq!(
            cfg.service_config.base_url.as_deref(),
            Some("https://dummyjson.test")
        );
    }

    #[test]
    fn unknown_service_lists_available() {
        let err = ConfigResolver::default()
            .resolve(&input(Some("ghost")), &dev_source(), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownService { .. }));
        let msg = err.to_string();
        assert!(msg.contains("ghost"));
        assert!(msg.contains("Available: dummyjson"));
    }

    #[test]
    fn unknown_service_without_services_says_none() {
        let source = MapSource::new(&[("dev", r#"{"timeoutMs": 10}"#)]);

        let err = ConfigResolver::default()
            .resolve(&input(Some("dummyjson")), &source, None)
            .unwrap_err();

        assert!(err.to_string().contains("Available: (none)"));
    }

    #[test]
    fn service_without_base_url_is_unknown() {
        let source = MapSource::new(&[("dev", r#"{"services": {"half": {"auth": "x"}}}"#)]);

        let err = ConfigResolver::default()
            .resolve(&input(Some("half")), &source, None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownService { .. }));
        assert!(err.to_string().contains("Available: half"));
    }

    #[test]
    fn blank_service_is_missing() {
        let err = ConfigResolver::default()
            .resolve(&input(Some("   ")), &dev_source(), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingService { .. }));
        assert!(err.to_string().contains("config/dev.json"));
    }

    #[test]
    fn absent_service_is_missing() {
        let err = ConfigResolver::default()
            .resolve(&input(None), &dev_source(), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingService { .. }));
    }

    #[test]
    fn default_service_used_when_absent() {
        let resolver = ConfigResolver {
            default_service: Some("dummyjson".into()),
            ..Default::default()
        };

        let cfg = resolver.resolve(&input(None), &dev_source(), None).unwrap();

        assert_eq!(cfg.service, "dummyjson");
    }

    #[test]
    fn service_is_trimmed() {
        let cfg = ConfigResolver::default()
            .resolve(&input(Some("  dummyjson\t")), &dev_source(), None)
            .unwrap();

        assert_eq!(cfg.service, "dummyjson");
    }

    #[test]
    fn environment_defaults_to_dev() {
        let source = dev_source();
        let resolve_input = ResolveInput {
            environment: Some("  ".into()),
            service: Some("dummyjson".into()),
            ..Default::default()
        };

        let cfg = ConfigResolver::default()
            .resolve(&resolve_input, &source, None)
            .unwrap();

        assert_eq!(cfg.env, "dev");
        assert_eq!(*source.loads.lock().unwrap(), vec!["dev"]);
    }

    #[test]
    fn missing_environment_fails() {
        let resolve_input = ResolveInput {
            environment: Some("staging".into()),
            service: Some("dummyjson".into()),
            ..Default::default()
        };

        let err = ConfigResolver::default()
            .resolve(&resolve_input, &dev_source(), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
    }

    #[test]
    fn path_like_environment_rejected_before_loading() {
        let source = dev_source();
        let resolve_input = ResolveInput {
            environment: Some("../x".into()),
            service: Some("dummyjson".into()),
            ..Default::default()
        };

        let err = ConfigResolver::default()
            .resolve(&resolve_input, &source, None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvironmentName { .. }));
        assert!(source.loads.lock().unwrap().is_empty());
    }

    #[test]
    fn malformed_sibling_services_do_not_block_selection() {
        let source = MapSource::new(&[(
            "dev",
            r#"{"services": {"dummyjson": {"baseUrl": "https://dummyjson.test"},
                             "legacy": "https://old.test",
                             "num": {"baseUrl": 42}}}"#,
        )]);

        let cfg = ConfigResolver::default()
            .resolve(&input(Some("dummyjson")), &source, None)
            .unwrap();
        assert_eq!(cfg.base_url, "https://dummyjson.test");

        let json: Value = serde_json::from_str(&to_json(&cfg, false).unwrap()).unwrap();
        assert_eq!(json["services"]["legacy"], "https://old.test");

        for broken in ["legacy", "num"] {
            let err = ConfigResolver::default()
                .resolve(&input(Some(broken)), &source, None)
                .unwrap_err();
            assert!(matches!(err, ConfigError::UnknownService { .. }));
            assert!(err.to_string().contains("Available: dummyjson, legacy, num"));
        }
    }

    #[test]
    fn common_headers_are_fixed() {
        let cfg = ConfigResolver::default()
            .resolve(&input(Some("dummyjson")), &dev_source(), None)
            .unwrap();

        assert_eq!(cfg.common_headers, common_headers());
        assert_eq!(cfg.common_headers["Accept"], "application/json");
        assert_eq!(cfg.common_headers["Content-Type"], "application/json");
    }

    #[test]
    fn strict_retry_is_attached_and_registered() {
        let registry = RecordingRegistry::default();
        let resolve_input = ResolveInput {
            service: Some("dummyjson".into()),
            retry: RetryInputs {
                count: Some(RawSetting::from("3")),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = ConfigResolver::default()
            .resolve(&resolve_input, &dev_source(), Some(&registry))
            .unwrap();

        let expected = RetrySettings {
            count: 3,
            interval: 1000,
        };
        assert_eq!(cfg.retry, Some(expected));
        assert_eq!(registry.current(), Some(expected));
    }

    #[test]
    fn invalid_retry_aborts_resolution() {
        let registry = RecordingRegistry::default();
        let resolve_input = ResolveInput {
            service: Some("dummyjson".into()),
            retry: RetryInputs {
                count: Some(RawSetting::from("0")),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = ConfigResolver::default()
            .resolve(&resolve_input, &dev_source(), Some(&registry))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidRetryConfig { .. }));
        assert_eq!(registry.current(), None);
    }

    #[test]
    fn disabled_retry_registers_nothing() {
        let registry = RecordingRegistry::default();
        let resolver = ConfigResolver {
            retry_policy: RetryPolicy::None,
            ..Default::default()
        };

        let cfg = resolver
            .resolve(&input(Some("dummyjson")), &dev_source(), Some(&registry))
            .unwrap();

        assert_eq!(cfg.retry, None);
        assert_eq!(registry.current(), None);
    }

    #[test]
    fn passthrough_keeps_file_fields_but_not_reserved_ones() {
        let source = MapSource::new(&[(
            "dev",
            r#"{"region": "eu", "baseUrl": "stale",
                "services": {"dummyjson": {"baseUrl": "https://dummyjson.test"}}}"#,
        )]);

        let cfg = ConfigResolver::default()
            .resolve(&input(Some("dummyjson")), &source, None)
            .unwrap();
        let json: Value = serde_json::from_str(&to_json(&cfg, false).unwrap()).unwrap();

        assert_eq!(json["region"], "eu");
        assert_eq!(json["baseUrl"], "https://dummyjson.test");
        assert_eq!(
            json["services"]["dummyjson"]["baseUrl"],
            "https://dummyjson.test"
        );
    }
}
