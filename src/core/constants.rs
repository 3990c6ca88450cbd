//! Serial link parameters and the fixed GPGGA fields

/// Default latitude of the simulated receiver (decimal degrees)
pub const DEFAULT_LATITUDE: f64 = 37.7749;
/// Default longitude of the simulated receiver (decimal degrees)
pub const DEFAULT_LONGITUDE: f64 = -122.4194;

/// Default serial device
pub const DEFAULT_PORT_PATH: &str = "/dev/serial0";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
/// One sentence per second
pub const DEFAULT_EMIT_INTERVAL_MS: u64 = 1000;

/// Talker and sentence identifier
pub const GGA_SENTENCE_ID: &str = "GPGGA";
pub const SENTENCE_TERMINATOR: &str = "\r\n";

// Fix data that never changes between sentences
pub const FIX_QUALITY: &str = "1";
pub const SATELLITES_IN_USE: &str = "08";
pub const HDOP: &str = "0.9";
pub const ALTITUDE_M: &str = "545.4";
pub const GEOID_SEPARATION_M: &str = "46.9";
pub const UNIT_METERS: &str = "M";
