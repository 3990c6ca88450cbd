//! NMEA sentence generation and checksums

pub mod checksum;
pub mod gga;

pub use checksum::{checksum, checksum_hex, verify};
pub use gga::{generate, SentenceGenerator};
