use crate::core::errors::Result;
use crate::core::models::environment_file::EnvironmentFile;

/// Port for loading environment files by name.
///
/// The shipped adapter reads `<dir>/<env>.json` or `<dir>/<env>.toml`;
/// tests plug in an in-memory map.
pub trait EnvironmentSource: Send + Sync {
    /// Load the environment file for `env`.
    ///
    /// Fails with `ConfigNotFound` when no file exists for the name.
    fn load(&self, env: &str) -> Result<EnvironmentFile>;

    /// Human-readable location of the file for `env`, used in hints.
    fn describe(&self, env: &str) -> String;

    /// Names of all environments this source can load, sorted.
    fn available(&self) -> Result<Vec<String>>;
}
