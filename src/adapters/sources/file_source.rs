use std::path::{Path, PathBuf};

use crate::core::services::name_rules::validate_env_name;
use crate::core::errors::{ConfigError, Result};
use crate::core::models::environment_file::EnvironmentFile;
use crate::core::traits::environment_source::EnvironmentSource;

/// Supported environment file formats, in lookup order.
const EXTENSIONS: &[&str] = &["json", "toml"];

/// Environment source backed by a directory of `<env>.json` /
/// `<env>.toml` files.
///
/// Example layout:
/// ```text
/// config/
///   dev.json
///   staging.toml
///   suite.toml      (project settings, not an environment)
/// ```
#[derive(Debug, Clone)]
pub struct FileEnvironmentSource {
    dir: PathBuf,
}

impl FileEnvironmentSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidates(&self, env: &str) -> Vec<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{env}.{ext}")))
            .collect()
    }

    fn parse(path: &Path, content: &str) -> Result<EnvironmentFile> {
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed: std::result::Result<EnvironmentFile, String> = if is_toml {
            toml::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|detail| ConfigError::InvalidEnvironmentFile {
            path: path.to_path_buf(),
            detail,
        })
    }
}

impl EnvironmentSource for FileEnvironmentSource {
    fn load(&self, env: &str) -> Result<EnvironmentFile> {
        validate_env_name(env)?;

        let candidates = self.candidates(env);
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            let searched = candidates
                .iter()
                .map(|p| format!("✗ {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n    ");
            return Err(ConfigError::ConfigNotFound {
                env: env.to_string(),
                searched,
            });
        };

        tracing::debug!(path = %path.display(), "reading environment file");
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    fn describe(&self, env: &str) -> String {
        self.candidates(env)
            .into_iter()
            .find(|p| p.is_file())
            .unwrap_or_else(|| self.dir.join(format!("{env}.json")))
            .display()
            .to_string()
    }

    fn available(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if EXTENSIONS.contains(&ext)
                && stem != crate::config::app_config::PROJECT_FILE_STEM
                && validate_env_name(stem).is_ok()
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}
