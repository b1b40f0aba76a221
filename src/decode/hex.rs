// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload text normalization.
//!
//! Payloads arrive as hexadecimal text, optionally carrying a two-character
//! radix marker ("0x"/"0X"). Normalization strips the marker and turns the
//! remaining digits into raw wire bytes.

use hex::FromHexError;

use crate::core::{Error, Result};

/// Strip an optional radix marker and decode hexadecimal text to bytes.
///
/// The remainder after marker removal must have even length; each byte is
/// encoded as two hex digits. Failures cite the offending length or digit
/// position.
pub fn normalize(text: &str) -> Result<Vec<u8>> {
    let body = strip_radix_marker(text);

    hex::decode(body).map_err(|e| match e {
        FromHexError::OddLength => Error::decode(
            "hex",
            format!("odd number of hex digits (length {})", body.len()),
        ),
        FromHexError::InvalidHexCharacter { c, index } => Error::decode(
            "hex",
            format!("invalid hex character '{c}' at position {index}"),
        ),
        other => Error::decode("hex", other.to_string()),
    })
}

/// Strip a leading "0x"/"0X" marker, if present.
fn strip_radix_marker(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        &text[2..]
    } else {
        text
    }
}
