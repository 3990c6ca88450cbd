//! Communication error types and handling

use thiserror::Error;

/// Communication error types for the serial link
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommError {
    /// The serial device could not be opened
    #[error("Failed to open serial port {port}: {description}")]
    PortOpen { port: String, description: String },
    /// Write or flush on an open channel failed
    #[error("I/O error during {operation}: {description}")]
    Io { operation: String, description: String },
    /// Sentence framing is wrong or contains non-ASCII bytes
    #[error("Invalid message: {details}")]
    InvalidMessage { details: String },
    /// Checksum validation failed
    #[error("Checksum error: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumError { expected: u8, received: u8 },
    /// Configuration error
    #[error("Configuration error: invalid {parameter} = {value}")]
    ConfigurationError { parameter: String, value: String },
    /// The channel was already released
    #[error("Serial channel {port} is closed")]
    Closed { port: String },
}

impl CommError {
    pub fn io(operation: &str, error: std::io::Error) -> Self {
        CommError::Io {
            operation: operation.to_string(),
            description: error.to_string(),
        }
    }
}

/// Result type for communication operations
pub type CommResult<T> = Result<T, CommError>;
