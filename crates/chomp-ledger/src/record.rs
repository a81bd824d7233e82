//! Versioned binary progress record codec.
//!
//! One explicit record format instead of sniffing remaining byte length:
//! a version byte followed by fixed-width little-endian fields. Unknown
//! versions fail closed.
//!
//! ```text
//! version(1) | owner(32) | streak(u64 LE, 8) | last_day_claimed(i64 LE, 8) | total_claims(u64 LE, 8)
//! ```

use chomp_core::schema::progress::UserProgress;
use thiserror::Error;

/// Current progress record schema version.
pub const RECORD_VERSION: u8 = 1;

/// Exact size in bytes of an encoded progress record.
pub const RECORD_SIZE: usize = 57;

const OWNER_END: usize = 33;
const STREAK_END: usize = 41;
const LAST_DAY_END: usize = 49;

/// Error decoding a stored progress record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The stored value is not exactly [`RECORD_SIZE`] bytes.
    #[error("progress record must be exactly {RECORD_SIZE} bytes, got {0}")]
    Length(usize),
    /// The stored value carries an unknown schema version.
    #[error("unknown progress record version {0}")]
    Version(u8),
}

#[allow(
    clippy::indexing_slicing,
    reason = "Offsets are compile-time constants within the fixed 57-byte buffer"
)]
/// Encode a progress record into its stored form.
#[must_use]
pub fn encode_record(progress: &UserProgress) -> [u8; RECORD_SIZE] {
    let mut buf = [0_u8; RECORD_SIZE];
    buf[0] = RECORD_VERSION;
    buf[1..OWNER_END].copy_from_slice(progress.owner.as_bytes());
    buf[OWNER_END..STREAK_END].copy_from_slice(&progress.streak.to_le_bytes());
    buf[STREAK_END..LAST_DAY_END].copy_from_slice(&progress.last_day_claimed.to_le_bytes());
    buf[LAST_DAY_END..].copy_from_slice(&progress.total_claims.to_le_bytes());
    buf
}

#[allow(
    clippy::indexing_slicing,
    reason = "Offsets are compile-time constants within the fixed 57-byte buffer"
)]
/// Decode a stored progress record.
///
/// # Errors
/// Returns an error if the value has the wrong length or an unknown version.
pub fn decode_record(bytes: &[u8]) -> Result<UserProgress, RecordError> {
    let buf: &[u8; RECORD_SIZE] = bytes
        .try_into()
        .map_err(|_| RecordError::Length(bytes.len()))?;
    if buf[0] != RECORD_VERSION {
        return Err(RecordError::Version(buf[0]));
    }

    let owner: [u8; 32] = buf[1..OWNER_END].try_into().expect("fixed slice length");
    let streak = u64::from_le_bytes(buf[OWNER_END..STREAK_END].try_into().expect("fixed slice"));
    let last_day_claimed =
        i64::from_le_bytes(buf[STREAK_END..LAST_DAY_END].try_into().expect("fixed slice"));
    let total_claims = u64::from_le_bytes(buf[LAST_DAY_END..].try_into().expect("fixed slice"));

    Ok(UserProgress {
        owner: owner.into(),
        streak,
        last_day_claimed,
        total_claims,
    })
}
