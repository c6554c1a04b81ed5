use crate::core::errors::{ConfigError, Result};
use crate::core::models::retry::{RetryPolicy, RetrySettings};
use crate::core::models::setting::RawSetting;

const DEFAULT_INTERVAL_MS: u64 = 1000;
const STRICT_DEFAULT_COUNT: u32 = 1;
const LENIENT_DEFAULT_COUNT: u32 = 0;

/// Retry inputs as supplied by the caller.
///
/// Each field has a primary source (flag or environment variable) and a
/// namespaced one (the `[retry]` section of `suite.toml`). The primary
/// source wins when both are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryInputs {
    pub count: Option<RawSetting>,
    pub interval: Option<RawSetting>,
    pub namespaced_count: Option<RawSetting>,
    pub namespaced_interval: Option<RawSetting>,
}

impl RetryInputs {
    fn count(&self) -> Option<&RawSetting> {
        self.count.as_ref().or(self.namespaced_count.as_ref())
    }

    fn interval(&self) -> Option<&RawSetting> {
        self.interval.as_ref().or(self.namespaced_interval.as_ref())
    }

    /// Whether the caller supplied any retry input at all.
    pub fn any_supplied(&self) -> bool {
        self.count().is_some() || self.interval().is_some()
    }
}

/// Turns raw retry inputs into `RetrySettings` under a `RetryPolicy`.
pub struct RetryResolver;

impl RetryResolver {
    /// Resolve retry settings, or `None` when the policy disables retries.
    ///
    /// # Errors
    ///
    /// - `InvalidRetryConfig` under `Strict` when count is not an integer
    ///   in `1..=u32::MAX` or interval is not an integer >= 0.
    pub fn resolve(
        &self,
        policy: RetryPolicy,
        inputs: &RetryInputs,
    ) -> Result<Option<RetrySettings>> {
        match policy {
            RetryPolicy::Strict => Self::strict(inputs).map(Some),
            RetryPolicy::Lenient => Ok(Some(Self::lenient(inputs))),
            RetryPolicy::None => Ok(None),
        }
    }

    fn strict(inputs: &RetryInputs) -> Result<RetrySettings> {
        let count = match inputs.count() {
            None => STRICT_DEFAULT_COUNT,
            Some(raw) => raw
                .parse_i64()
                .filter(|n| *n >= 1)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ConfigError::InvalidRetryConfig {
                    field: "retries",
                    value: raw.to_string(),
                    expected: "between 1 and 4294967295",
                })?,
        };

        let interval = match inputs.interval() {
            None => DEFAULT_INTERVAL_MS,
            Some(raw) => raw
                .parse_i64()
                .and_then(|n| u64::try_from(n).ok())
                .ok_or_else(|| ConfigError::InvalidRetryConfig {
                    field: "retryInterval",
                    value: raw.to_string(),
                    expected: ">= 0 (milliseconds)",
                })?,
        };

        Ok(RetrySettings { count, interval })
    }

    fn lenient(inputs: &RetryInputs) -> RetrySettings {
        let count = inputs
            .count()
            .and_then(RawSetting::parse_i64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(LENIENT_DEFAULT_COUNT);

        let interval = inputs
            .interval()
            .and_then(RawSetting::parse_i64)
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(DEFAULT_INTERVAL_MS);

        let settings = RetrySettings { count, interval };
        if inputs.any_supplied() {
            tracing::info!("retry settings resolved count={count} interval={interval}");
        }
        settings
    }
}
