//! Output channel trait and serial link configuration

use crate::core::{DEFAULT_BAUD_RATE, DEFAULT_PORT_PATH, DEFAULT_READ_TIMEOUT_MS};
use crate::hardware::{CommError, CommResult};
use serde::{Deserialize, Serialize};

/// A channel NMEA sentences are written to.
///
/// Implementations receive already-terminated ASCII bytes. `close` must be
/// idempotent from the caller's point of view; writing after close fails.
pub trait NmeaSink {
    /// Write one terminated sentence
    fn write_sentence(&mut self, bytes: &[u8]) -> CommResult<()>;

    /// Release the underlying device
    fn close(&mut self) -> CommResult<()>;

    /// Whether the channel is still open
    fn is_open(&self) -> bool;

    /// Device name for diagnostics
    fn port_name(&self) -> &str;
}

/// Serial link parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/serial0`
    pub port_path: String,
    pub baud_rate: u32,
    /// Timeout for read operations (milliseconds)
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port_path: DEFAULT_PORT_PATH.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub fn new(port_path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_path: port_path.into(),
            baud_rate,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> CommResult<()> {
        if self.port_path.trim().is_empty() {
            return Err(CommError::ConfigurationError {
                parameter: "port_path".to_string(),
                value: format!("{:?}", self.port_path),
            });
        }

        if self.baud_rate == 0 {
            return Err(CommError::ConfigurationError {
                parameter: "baud_rate".to_string(),
                value: self.baud_rate.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serial_config() {
        let config = SerialConfig::default();
        assert_eq!(config.port_path, "/dev/serial0");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.read_timeout_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_serial_config() {
        let config = SerialConfig::new("", 9600);
        assert!(matches!(config.validate(), Err(CommError::ConfigurationError { .. })));

        let config = SerialConfig::new("/dev/ttyUSB0", 0);
        assert!(config.validate().is_err());
    }
}
