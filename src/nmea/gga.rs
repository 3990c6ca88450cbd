//! GPGGA (fix data) sentence generation

use crate::core::{
    Position, ALTITUDE_M, FIX_QUALITY, GEOID_SEPARATION_M, GGA_SENTENCE_ID, HDOP,
    SATELLITES_IN_USE, UNIT_METERS,
};
use crate::nmea::checksum::checksum;
use chrono::{DateTime, Utc};

/// Split an angle into truncated whole degrees, decimal minutes and a
/// hemisphere letter. Degrees stay `f64` so magnitudes past `u32` print in full.
fn split_degrees(value: f64, positive: char, negative: char) -> (f64, f64, char) {
    let magnitude = value.abs();
    let degrees = magnitude.trunc();
    let minutes = (magnitude - degrees) * 60.0;
    let hemisphere = if value >= 0.0 { positive } else { negative };
    (degrees, minutes, hemisphere)
}

/// `ddmm.mmmm` and the N/S letter
fn format_latitude(latitude: f64) -> (String, char) {
    let (degrees, minutes, hemisphere) = split_degrees(latitude, 'N', 'S');
    (format!("{:02.0}{:07.4}", degrees, minutes), hemisphere)
}

/// `dddmm.mmmm` and the E/W letter
fn format_longitude(longitude: f64) -> (String, char) {
    let (degrees, minutes, hemisphere) = split_degrees(longitude, 'E', 'W');
    (format!("{:03.0}{:07.4}", degrees, minutes), hemisphere)
}

/// Build the comma-joined body between `$` and `*`
pub fn sentence_body(latitude: f64, longitude: f64, now: DateTime<Utc>) -> String {
    let (lat, lat_hemi) = format_latitude(latitude);
    let (lon, lon_hemi) = format_longitude(longitude);

    // Centiseconds are always reported as zero
    let utc_time = now.format("%H%M%S.00");

    // Trailing two empty fields: DGPS age and station ID
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},,",
        GGA_SENTENCE_ID,
        utc_time,
        lat,
        lat_hemi,
        lon,
        lon_hemi,
        FIX_QUALITY,
        SATELLITES_IN_USE,
        HDOP,
        ALTITUDE_M,
        UNIT_METERS,
        GEOID_SEPARATION_M,
        UNIT_METERS,
    )
}

/// Produce a complete `$GPGGA,...*XX` sentence without terminator.
///
/// Inputs are not range checked; NaN or out-of-range values are formatted
/// as they are.
pub fn generate(latitude: f64, longitude: f64, now: DateTime<Utc>) -> String {
    let body = sentence_body(latitude, longitude, now);
    format!("${}*{:02X}", body, checksum(&body))
}

/// Generator bound to one fixed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceGenerator {
    position: Position,
}

impl SentenceGenerator {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn sentence_at(&self, now: DateTime<Utc>) -> String {
        generate(self.position.latitude, self.position.longitude, now)
    }
}
