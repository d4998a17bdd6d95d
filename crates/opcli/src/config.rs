//! Client configuration
//!
//! Settings come from `~/.config/opcli/config.toml` with environment
//! overrides, and every value must be non-blank before any network call is
//! attempted.

use serde::Deserialize;
use std::path::PathBuf;

/// Connection settings for the OpenProject server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required setting: {0} (set it in config.toml or the environment)")]
    Missing(&'static str),
}

fn config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("opcli").join("config.toml"))
}

impl Config {
    /// Load the configuration file, apply environment overrides, and
    /// validate.
    ///
    /// Recognized variables: `OPENPROJECT_BASE_URL`, `OPENPROJECT_API_KEY`,
    /// `OPENPROJECT_PROJECT`. A missing config file is fine as long as the
    /// environment supplies every setting.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?
            }
            _ => Config::default(),
        };

        if let Ok(value) = std::env::var("OPENPROJECT_BASE_URL") {
            config.base_url = value;
        }
        if let Ok(value) = std::env::var("OPENPROJECT_API_KEY") {
            config.api_key = value;
        }
        if let Ok(value) = std::env::var("OPENPROJECT_PROJECT") {
            config.project = value;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("base_url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        if self.project.trim().is_empty() {
            return Err(ConfigError::Missing("project"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            base_url: "https://openproject.example.com".to_string(),
            api_key: "secret".to_string(),
            project: "demo".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_a_complete_config() {
        assert!(full_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_settings() {
        let mut config = full_config();
        config.base_url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("base_url"))
        ));

        let mut config = full_config();
        config.api_key.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("api_key"))
        ));

        let mut config = full_config();
        config.project.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("project"))
        ));
    }

    #[test]
    fn test_partial_config_file_parses_with_defaults() {
        let config: Config = toml::from_str("base_url = \"https://op.example.com\"").unwrap();

        assert_eq!(config.base_url, "https://op.example.com");
        assert_eq!(config.api_key, "");
        assert_eq!(config.project, "");
    }
}
