//! Core configuration loaded from TOML.
//!
//! Every field has a default, so an empty document (or a missing file) is a
//! valid configuration:
//!
//! ```toml
//! [clinic]
//! default_name = "My Clinic"
//!
//! [views]
//! upcoming_limit = 10
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! log_data = false
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::logging::{LogConfig, LogFormat};
use crate::models::DEFAULT_CLINIC_NAME;
use crate::views::UPCOMING_LIMIT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub clinic: ClinicConfig,
    pub views: ViewConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Name given to the clinic created on first launch.
    pub default_name: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_CLINIC_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Length of the upcoming appointments list.
    pub upcoming_limit: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: UPCOMING_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
    pub log_data: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            log_data: false,
        }
    }
}

impl CoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Subscriber settings for [`crate::logging::init_logging`].
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        Ok(LogConfig::default()
            .with_level(parse_level(&self.logging.level)?)
            .with_format(self.logging.format)
            .with_log_data(self.logging.log_data))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.clinic.default_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "clinic.default_name must not be empty".into(),
            ));
        }
        if self.views.upcoming_limit == 0 {
            return Err(ConfigError::Invalid(
                "views.upcoming_limit must be at least 1".into(),
            ));
        }
        parse_level(&self.logging.level)?;
        Ok(())
    }
}

fn parse_level(raw: &str) -> Result<Level, ConfigError> {
    Level::from_str(raw.trim())
        .map_err(|_| ConfigError::Invalid(format!("unknown log level: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_document_is_default() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.clinic.default_name, "My Clinic");
        assert_eq!(config.views.upcoming_limit, 10);
    }

    #[test]
    fn test_partial_document() {
        let config = CoreConfig::from_toml_str(
            r#"
            [clinic]
            default_name = "Riverside Clinic"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.clinic.default_name, "Riverside Clinic");
        assert_eq!(config.views.upcoming_limit, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            CoreConfig::from_toml_str("[views]\nupcoming_limit = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_toml_str("[clinic]\ndefault_name = \"  \""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_toml_str("[logging]\nlevel = \"loud\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_toml_str("[views"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_log_config() {
        let config =
            CoreConfig::from_toml_str("[logging]\nlevel = \"debug\"\nlog_data = true").unwrap();
        let log = config.log_config().unwrap();
        assert_eq!(log.level, Level::DEBUG);
        assert!(log.log_data);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CoreConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "[views]\nupcoming_limit = 5\n").unwrap();

        let config = CoreConfig::load(&path).unwrap();
        assert_eq!(config.views.upcoming_limit, 5);
    }
}
