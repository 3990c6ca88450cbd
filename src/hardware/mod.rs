//! Hardware abstraction layer for the serial output channel

pub mod sink;
pub mod serial;
pub mod mock;
pub mod error;

pub use sink::{NmeaSink, SerialConfig};
pub use serial::SerialTransmitter;
pub use mock::MockTransmitter;
pub use error::{CommError, CommResult};
