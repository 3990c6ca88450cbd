//! NMEA 0183 checksum: XOR of every byte between `$` and `*`

use crate::hardware::{CommError, CommResult};

/// XOR all bytes of a sentence body
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Two-digit uppercase hex rendering used on the wire
pub fn checksum_hex(body: &str) -> String {
    format!("{:02X}", checksum(body))
}

/// Check framing and checksum of `$<body>*<XX>`, with or without CRLF.
///
/// Returns the body on success.
pub fn verify(sentence: &str) -> CommResult<&str> {
    let sentence = sentence.trim_end_matches(['\r', '\n']);

    let rest = sentence.strip_prefix('$').ok_or_else(|| CommError::InvalidMessage {
        details: "missing leading '$'".to_string(),
    })?;

    let (body, trailer) = rest.rsplit_once('*').ok_or_else(|| CommError::InvalidMessage {
        details: "missing '*' checksum delimiter".to_string(),
    })?;

    if trailer.len() != 2 {
        return Err(CommError::InvalidMessage {
            details: format!("checksum field must be two hex digits, got {:?}", trailer),
        });
    }

    let received = u8::from_str_radix(trailer, 16).map_err(|_| CommError::InvalidMessage {
        details: format!("checksum field is not hex: {:?}", trailer),
    })?;

    let expected = checksum(body);
    if expected != received {
        return Err(CommError::ChecksumError { expected, received });
    }

    Ok(body)
}
