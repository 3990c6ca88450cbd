//! NMEA GPS Simulator
//!
//! Emulates a GPS receiver by writing a checksummed `$GPGGA` sentence for a
//! fixed position to a serial port once per second.

pub mod core;
pub mod nmea;
pub mod hardware;
pub mod utils;
pub mod simulator;

// Re-export commonly used types
pub use self::core::Position;
pub use nmea::{checksum, generate, verify, SentenceGenerator};
pub use hardware::{NmeaSink, SerialConfig, SerialTransmitter, MockTransmitter, CommError, CommResult};
pub use utils::{SimulatorConfig, ConfigError};
pub use simulator::{CancellationToken, RunSummary, Simulator, SinkGuard};
