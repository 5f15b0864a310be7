use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml, Yaml},
    Figment,
};

use crate::error::{ConfigError, Result};
use crate::model::ConsoleConfig;

pub const DEFAULT_ENV_PREFIX: &str = "BEDCARE_";

/// Builder that layers defaults, an optional file and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Layer a YAML or TOML file over the defaults. The file must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Layer a file only when it exists on disk
    pub fn optional_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.is_file() {
            self.file(path)
        } else {
            tracing::debug!(path = %path.display(), "optional config file absent");
            self
        }
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ConsoleConfig::default()));

        if let Some(path) = &self.file {
            if !path.is_file() {
                return Err(ConfigError::SourceNotFound(path.display().to_string()));
            }
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            figment = match extension.as_str() {
                "yaml" | "yml" => figment.merge(Yaml::file(path)),
                "toml" => figment.merge(Toml::file(path)),
                _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
            };
        }

        Ok(figment.merge(Env::prefixed(&self.env_prefix).split("__")))
    }

    /// Extract and validate the configuration.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or has an unknown extension, when a
    /// layer does not deserialize, or when [`ConsoleConfig::validate`] rejects
    /// the merged result.
    pub fn load(&self) -> Result<ConsoleConfig> {
        let config: ConsoleConfig = self.figment()?.extract()?;
        config.validate()?;
        tracing::debug!(
            file = ?self.file,
            parse_policy = ?config.billing.parse_policy,
            "console configuration loaded"
        );
        Ok(config)
    }
}
