//! Simulator configuration with JSON load/save

use crate::core::{Position, DEFAULT_EMIT_INTERVAL_MS};
use crate::hardware::SerialConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Simulator configuration.
///
/// Every field has a default matching the stock receiver setup, so a JSON
/// file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Serial link parameters
    pub serial: SerialConfig,
    /// Fixed position reported in every sentence
    pub position: Position,
    /// Delay between sentences (milliseconds)
    pub emit_interval_ms: u64,
    /// Reject positions outside [-90, 90] / [-180, 180].
    /// Off by default: the generator formats whatever it is given.
    pub validate_position: bool,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    #[error("I/O error: {message}")]
    IoError { message: String },
    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            position: Position::default(),
            emit_interval_ms: DEFAULT_EMIT_INTERVAL_MS,
            validate_position: false,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: SimulatorConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.serial.validate().map_err(|e| ConfigError::InvalidParameter {
            parameter: "serial".to_string(),
            value: format!("{}@{}", self.serial.port_path, self.serial.baud_rate),
            reason: e.to_string(),
        })?;

        if self.emit_interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "emit_interval_ms".to_string(),
                value: self.emit_interval_ms.to_string(),
                reason: "Interval must be greater than zero".to_string(),
            });
        }

        if self.validate_position && !self.position.is_within_bounds() {
            return Err(ConfigError::InvalidParameter {
                parameter: "position".to_string(),
                value: format!("{}, {}", self.position.latitude, self.position.longitude),
                reason: "Latitude must be in [-90, 90] and longitude in [-180, 180]".to_string(),
            });
        }

        Ok(())
    }

    pub fn emit_interval(&self) -> Duration {
        Duration::from_millis(self.emit_interval_ms)
    }
}
