//! Fixed-layout claim payload codec.
//!
//! A [`ClaimPayload`] is the only value the attestation oracle ever signs
//! and the ledger ever verifies. Both sides encode it independently and the
//! encodings must be byte-identical, so the layout is fixed here once:
//! exactly 100 bytes, every integer little-endian.
//!
//! ```text
//! magic(4) | user(32) | day(i64 LE, 8) | session_hash(32) | nonce(16) | expires_at(i64 LE, 8)
//! ```

use thiserror::Error;

use crate::base::{Nonce, SessionHash, UserId};

/// Format/version tag leading every encoded payload.
pub const PAYLOAD_MAGIC: [u8; 4] = *b"CPv1";

/// Exact size in bytes of an encoded payload.
pub const PAYLOAD_SIZE: usize = 100;

const MAGIC_END: usize = 4;
const USER_END: usize = 36;
const DAY_END: usize = 44;
const SESSION_END: usize = 76;
const NONCE_END: usize = 92;

/// A claim-signing request bound to one user, day and detection session.
///
/// Immutable value type; construct a new one rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimPayload {
    /// Claimant identity the attestation is bound to.
    pub user: UserId,
    /// UTC day number being claimed.
    pub day: i64,
    /// Commitment to the external detection proof.
    pub session_hash: SessionHash,
    /// Caller-chosen replay-scoping nonce.
    pub nonce: Nonce,
    /// Unix-seconds deadline after which the attestation must be rejected.
    pub expires_at: i64,
}

/// Error decoding a claim payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The buffer is not exactly [`PAYLOAD_SIZE`] bytes.
    #[error("claim payload must be exactly {PAYLOAD_SIZE} bytes, got {0}")]
    Length(usize),
    /// The leading magic bytes do not match [`PAYLOAD_MAGIC`].
    #[error("unrecognized claim payload magic {0:02x?}")]
    Magic([u8; 4]),
}

#[allow(
    clippy::indexing_slicing,
    reason = "Offsets are compile-time constants within the fixed 100-byte buffer"
)]
impl ClaimPayload {
    /// Encode into the fixed 100-byte wire form.
    ///
    /// Deterministic and total: identical logical input always produces
    /// identical bytes.
    #[must_use]
    pub fn encode(&self) -> [u8; PAYLOAD_SIZE] {
        let mut buf = [0_u8; PAYLOAD_SIZE];
        buf[..MAGIC_END].copy_from_slice(&PAYLOAD_MAGIC);
        buf[MAGIC_END..USER_END].copy_from_slice(self.user.as_bytes());
        buf[USER_END..DAY_END].copy_from_slice(&self.day.to_le_bytes());
        buf[DAY_END..SESSION_END].copy_from_slice(self.session_hash.as_bytes());
        buf[SESSION_END..NONCE_END].copy_from_slice(self.nonce.as_bytes());
        buf[NONCE_END..].copy_from_slice(&self.expires_at.to_le_bytes());
        buf
    }

    /// Decode from wire bytes.
    ///
    /// # Errors
    /// Returns [`PayloadError::Length`] if the buffer is not exactly 100
    /// bytes, or [`PayloadError::Magic`] if the format tag is unrecognized.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let buf: &[u8; PAYLOAD_SIZE] = bytes
            .try_into()
            .map_err(|_| PayloadError::Length(bytes.len()))?;

        let magic: [u8; 4] = buf[..MAGIC_END].try_into().expect("fixed slice length");
        if magic != PAYLOAD_MAGIC {
            return Err(PayloadError::Magic(magic));
        }

        let user: [u8; 32] = buf[MAGIC_END..USER_END]
            .try_into()
            .expect("fixed slice length");
        let day = i64::from_le_bytes(buf[USER_END..DAY_END].try_into().expect("fixed slice"));
        let session_hash: [u8; 32] = buf[DAY_END..SESSION_END]
            .try_into()
            .expect("fixed slice length");
        let nonce: [u8; 16] = buf[SESSION_END..NONCE_END]
            .try_into()
            .expect("fixed slice length");
        let expires_at = i64::from_le_bytes(buf[NONCE_END..].try_into().expect("fixed slice"));

        Ok(Self {
            user: user.into(),
            day,
            session_hash: session_hash.into(),
            nonce: nonce.into(),
            expires_at,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Test code should panic on invalid data"
)]
mod tests {
    use hex_literal::hex;
    use test_utils::{b16, b32};

    use super::*;

    fn sample() -> ClaimPayload {
        ClaimPayload {
            user: b32!(1),
            day: 100,
            session_hash: b32!(2),
            nonce: b16!(3),
            expires_at: 8_640_060,
        }
    }

    #[test]
    fn encode_is_exactly_100_bytes() {
        assert_eq!(sample().encode().len(), PAYLOAD_SIZE);
    }

    #[test]
    fn round_trip() {
        let payload = sample();
        let decoded = ClaimPayload::decode(&payload.encode()).expect("decode should succeed");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn round_trip_negative_integers() {
        let payload = ClaimPayload {
            day: -1,
            expires_at: i64::MIN,
            ..sample()
        };
        let decoded = ClaimPayload::decode(&payload.encode()).expect("decode should succeed");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn known_byte_layout() {
        let encoded = sample().encode();
        let expected = hex!(
            // magic "CPv1"
            "43507631"
            // user: zeros with last byte 1
            "0000000000000000000000000000000000000000000000000000000000000001"
            // day = 100, i64 LE
            "6400000000000000"
            // session hash: zeros with last byte 2
            "0000000000000000000000000000000000000000000000000000000000000002"
            // nonce: zeros with last byte 3
            "00000000000000000000000000000003"
            // expires_at = 8_640_060, i64 LE
            "3cd8830000000000"
        );
        assert_eq!(encoded, expected);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            ClaimPayload::decode(&[0_u8; 99]),
            Err(PayloadError::Length(99))
        );
        assert_eq!(
            ClaimPayload::decode(&[0_u8; 101]),
            Err(PayloadError::Length(101))
        );
    }

    #[test]
    fn decode_rejects_unknown_magic() {
        let mut bytes = sample().encode();
        bytes[0] = b'X';
        assert_eq!(
            ClaimPayload::decode(&bytes),
            Err(PayloadError::Magic(*b"XPv1"))
        );
    }
}
