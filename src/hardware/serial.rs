//! Serial/UART output channel backed by the `serialport` crate

use crate::hardware::{CommError, CommResult, NmeaSink, SerialConfig};
use log::{debug, info};
use serialport::SerialPort;
use std::io::Write;
use std::time::Duration;

/// Serial transmitter for NMEA sentences
pub struct SerialTransmitter {
    config: SerialConfig,
    port: Option<Box<dyn SerialPort>>,
    bytes_written: u64,
}

impl SerialTransmitter {
    /// Open the configured serial device
    pub fn open(config: SerialConfig) -> CommResult<Self> {
        config.validate()?;

        let port = serialport::new(config.port_path.as_str(), config.baud_rate)
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .open()
            .map_err(|e| CommError::PortOpen {
                port: config.port_path.clone(),
                description: e.to_string(),
            })?;

        info!(
            "Opened serial port {} at {} baud",
            config.port_path, config.baud_rate
        );

        Ok(Self {
            config,
            port: Some(port),
            bytes_written: 0,
        })
    }
}

impl NmeaSink for SerialTransmitter {
    fn write_sentence(&mut self, bytes: &[u8]) -> CommResult<()> {
        let port = self.port.as_mut().ok_or_else(|| CommError::Closed {
            port: self.config.port_path.clone(),
        })?;

        port.write_all(bytes).map_err(|e| CommError::io("write", e))?;
        port.flush().map_err(|e| CommError::io("flush", e))?;

        self.bytes_written += bytes.len() as u64;
        debug!("Wrote {} bytes to {}", bytes.len(), self.config.port_path);
        Ok(())
    }

    fn close(&mut self) -> CommResult<()> {
        // Dropping the handle releases the device
        if self.port.take().is_some() {
            info!(
                "Closed serial port {} after {} bytes",
                self.config.port_path, self.bytes_written
            );
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn port_name(&self) -> &str {
        &self.config.port_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let config = SerialConfig::new("/dev/nonexistent-gps-simulator-port", 9600);
        let result = SerialTransmitter::open(config);
        assert!(matches!(result, Err(CommError::PortOpen { .. })));
    }

    #[test]
    fn test_invalid_config_rejected_before_open() {
        let config = SerialConfig::new("/dev/ttyUSB0", 0);
        let result = SerialTransmitter::open(config);
        assert!(matches!(result, Err(CommError::ConfigurationError { .. })));
    }
}
