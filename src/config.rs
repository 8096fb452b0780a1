//! Configuration
//!
//! Loaded from a JSON file. Every key is optional; missing keys take their
//! defaults. Unknown keys are rejected so typos surface early.
//!
//! ```json
//! {
//!   "default_page_size": 6,
//!   "max_page_size": 100,
//!   "default_amount": 30.0,
//!   "log_level": "INFO"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    /// File is not valid config JSON
    #[error("Invalid config JSON: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl ConfigError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "PINOS_CONFIG_READ",
            ConfigError::Parse(_) => "PINOS_CONFIG_PARSE",
            ConfigError::InvalidValue(_) => "PINOS_CONFIG_INVALID",
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page size when a request omits one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Amount filled into charges/payments that lack one
    #[serde(default = "default_amount")]
    pub default_amount: f64,

    /// Minimum severity written to the log
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_page_size() -> usize {
    6
}
fn default_max_page_size() -> usize {
    100
}
fn default_amount() -> f64 {
    30.0
}
fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_amount: default_amount(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "default_page_size must be > 0".to_string(),
            ));
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "max_page_size must be > 0".to_string(),
            ));
        }

        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }

        if !self.default_amount.is_finite() || self.default_amount < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "default_amount must be a non-negative number, got {}",
                self.default_amount
            )));
        }

        Ok(())
    }
}
