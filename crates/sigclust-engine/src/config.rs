//! Configuration for the clustering engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`ClusteringEngine`](crate::ClusteringEngine)
///
/// # Examples
///
/// ```
/// use sigclust_engine::EngineConfig;
///
/// let config = EngineConfig::from_toml("request_timeout_secs = 30").unwrap();
/// assert_eq!(config.request_timeout_secs, 30);
/// assert_eq!(config.max_samples, EngineConfig::default().max_samples);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Time budget for one request (seconds)
    /// Default: 60
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Largest aggregated sample count accepted for clustering
    /// Default: 10000 (the distance table grows quadratically)
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Log a warning when the same sample id arrives from more than one row
    /// Default: true
    #[serde(default = "default_warn_on_duplicates")]
    pub warn_on_duplicates: bool,
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_samples() -> usize {
    10_000
}

fn default_warn_on_duplicates() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            max_samples: default_max_samples(),
            warn_on_duplicates: default_warn_on_duplicates(),
        }
    }
}

impl EngineConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_samples < 2 {
            return Err("max_samples must be at least 2".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
