use std::sync::OnceLock;

use crate::core::errors::{ConfigError, Result};
use crate::core::models::retry::RetrySettings;
use crate::core::traits::retry_registry::RetryRegistry;

/// Write-once retry registry.
///
/// The first registration wins for the rest of the run. Registering the
/// same settings again is a no-op, different settings are rejected.
#[derive(Debug, Default)]
pub struct OnceRetryRegistry {
    cell: OnceLock<RetrySettings>,
}

impl OnceRetryRegistry {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }
}

impl RetryRegistry for OnceRetryRegistry {
    fn register(&self, settings: &RetrySettings) -> Result<()> {
        let stored = self.cell.get_or_init(|| *settings);
        if stored == settings {
            Ok(())
        } else {
            Err(ConfigError::RetryAlreadyRegistered {
                existing: stored.to_string(),
            })
        }
    }

    fn current(&self) -> Option<RetrySettings> {
        self.cell.get().copied()
    }
}

/// Process-wide registry consulted by the engine for the current run.
pub fn global() -> &'static OnceRetryRegistry {
    static GLOBAL: OnceRetryRegistry = OnceRetryRegistry::new();
    &GLOBAL
}
