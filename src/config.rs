//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::i18n::Locale;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Platform REST API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token of the super-admin session.
    #[serde(default)]
    pub token: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// How long a toast stays on screen.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_page_size() -> usize {
    20
}

fn default_toast_secs() -> u64 {
    5
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    ///
    /// Falls back to the executable's directory when no home directory is known.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory holding config.toml and the logs/ folder.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("io", "schoolcloud", "school-admin-console")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 1 || self.api.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "API timeout must be between 1 and 300 seconds".to_string(),
            ));
        }
        if self.ui.page_size < 5 || self.ui.page_size > 200 {
            return Err(ConfigError::Validation(
                "Page size must be between 5 and 200".to_string(),
            ));
        }
        if self.ui.toast_secs < 1 || self.ui.toast_secs > 60 {
            return Err(ConfigError::Validation(
                "Toast duration must be between 1 and 60 seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            page_size: default_page_size(),
            toast_secs: default_toast_secs(),
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_page_size_bounds() {
        let mut config = AppConfig::default();

        config.ui.page_size = 4;
        assert!(config.validate().is_err());

        config.ui.page_size = 201;
        assert!(config.validate().is_err());

        config.ui.page_size = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[api]\nbase_url = \"https://api.example.com\"\n").unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.token.is_empty());
        assert_eq!(config.ui.page_size, 20);
        assert_eq!(config.ui.locale, Locale::En);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.api.base_url = "https://api.example.com".to_string();
        config.ui.locale = Locale::Fr;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.api.base_url, "https://api.example.com");
                assert_eq!(loaded.ui.locale, Locale::Fr);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));

        std::fs::write(&path, "[api]\nbase_url = \"\"\n").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));
    }
}
