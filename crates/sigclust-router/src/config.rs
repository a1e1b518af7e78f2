//! Configuration file parsing for the Router.
//!
//! Loads settings from TOML files including bind address, data locations
//! and the clustering engine's limits.

use serde::Deserialize;
use sigclust_engine::EngineConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides `data_dir`
pub const DATA_DIR_ENV: &str = "SIGCLUST_DATA_DIR";

/// Router configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Router configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Directory holding `meta.tsv` and the per-project count files
    pub data_dir: PathBuf,

    /// Precomputed samples × signatures exposure table
    pub exposures_path: PathBuf,

    /// Clustering engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl RouterConfig {
    /// Load configuration from a TOML file
    ///
    /// `SIGCLUST_DATA_DIR`, when set, replaces `data_dir`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string without validating it
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Check required fields and engine limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("data_dir".to_string()));
        }
        if self.exposures_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("exposures_path".to_string()));
        }
        self.engine.validate().map_err(ConfigError::Invalid)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        RouterConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            data_dir: PathBuf::from("data"),
            exposures_path: PathBuf::from("data/exposures.tsv"),
            engine: EngineConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.engine.request_timeout_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = RouterConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            data_dir = "/srv/sigclust/data"
            exposures_path = "/srv/sigclust/exposures.tsv"

            [engine]
            request_timeout_secs = 15
            warn_on_duplicates = false
        "#;

        let config = RouterConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/sigclust/data"));
        assert_eq!(config.engine.request_timeout_secs, 15);
        assert!(!config.engine.warn_on_duplicates);
        assert_eq!(config.engine.max_samples, EngineConfig::default().max_samples);
    }

    #[test]
    fn test_engine_table_is_optional() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
            data_dir = "data"
            exposures_path = "exposures.tsv"
        "#;
        let config = RouterConfig::from_toml(toml).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RouterConfig::default_test_config();
        config.data_dir = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));

        let mut config = RouterConfig::default_test_config();
        config.engine.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_required_field() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
        "#;
        assert!(matches!(
            RouterConfig::from_toml(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
