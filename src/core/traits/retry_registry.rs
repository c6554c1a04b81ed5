use crate::core::errors::Result;
use crate::core::models::retry::RetrySettings;

/// Port for publishing the suite-wide retry default to the test engine.
///
/// Registration happens at most once per run, during bootstrap.
pub trait RetryRegistry: Send + Sync {
    /// Register `settings` as the default for every "retry until" step.
    fn register(&self, settings: &RetrySettings) -> Result<()>;

    /// The settings registered so far, if any.
    fn current(&self) -> Option<RetrySettings>;
}
