//! Hex/base64 parsing helpers for transport-level byte fields.
//!
//! The oracle HTTP surface accepts fixed-size byte fields as either hex or
//! base64 strings; the responses carry the payload and signature as base64.
//! These helpers do the flexible parsing once, so every caller reports the
//! same errors.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Error parsing a fixed-size byte field from a string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BytesParseError {
    /// The string is neither valid hex nor valid base64.
    #[error("expected hex or base64, got neither")]
    Encoding,
    /// The decoded value has the wrong length.
    #[error("expected exactly {expected} bytes, got {actual}")]
    Length {
        /// Required byte length.
        expected: usize,
        /// Actual decoded length.
        actual: usize,
    },
}

/// Parse a fixed-size byte array from a hex or base64 string.
///
/// Hex is tried first; base64 (standard alphabet, padded) second.
///
/// # Errors
/// Returns an error if the string decodes under neither encoding, or decodes
/// to the wrong number of bytes.
pub fn parse_fixed_bytes<const N: usize>(s: &str) -> Result<[u8; N], BytesParseError> {
    let decoded = hex::decode(s)
        .or_else(|_| STANDARD.decode(s))
        .map_err(|_| BytesParseError::Encoding)?;
    let actual = decoded.len();
    decoded
        .try_into()
        .map_err(|_| BytesParseError::Length { expected: N, actual })
}

/// Encode bytes as a standard base64 string.
#[must_use]
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 string into a fixed-size byte array.
///
/// # Errors
/// Returns an error if the string is not base64 or decodes to the wrong
/// number of bytes.
pub fn from_base64_exact<const N: usize>(s: &str) -> Result<[u8; N], BytesParseError> {
    let decoded = STANDARD.decode(s).map_err(|_| BytesParseError::Encoding)?;
    let actual = decoded.len();
    decoded
        .try_into()
        .map_err(|_| BytesParseError::Length { expected: N, actual })
}
