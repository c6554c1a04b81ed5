use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Default directory holding `<env>.json` files and `suite.toml`.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Initialize the global config directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `config`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
    let _ = CONFIG_DIR.set(dir);
}

/// Get the current config directory path.
pub fn config_dir() -> &'static Path {
    CONFIG_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_CONFIG_DIR))
}

/// Pick the environment for a command: the trimmed `--env` value, or
/// `default_env` (from `suite.toml`) when the flag is absent or blank.
pub fn env_or_default<'a>(flag: Option<&'a str>, default_env: &'a str) -> &'a str {
    flag.map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(default_env)
}
