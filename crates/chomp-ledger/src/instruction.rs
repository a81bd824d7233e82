//! Raw claim instruction data codec.
//!
//! Wire form of a claim submission as an authoritative ledger receives it:
//!
//! ```text
//! discriminator(8) | day(i64 LE, 8) | session_hash(32) | nonce(16) | expires_at(i64 LE, 8) | signature(64)
//! ```
//!
//! 136 bytes total. The discriminator selects the entry point; the payload
//! the signature covers is reconstructed from these same fields plus the
//! authenticated caller, never trusted from the submitter.

use chomp_core::base::{Nonce, SessionHash};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Exact size in bytes of an encoded claim instruction.
pub const CLAIM_INSTRUCTION_SIZE: usize = 136;

const DISCRIMINATOR_END: usize = 8;
const DAY_END: usize = 16;
const SESSION_END: usize = 48;
const NONCE_END: usize = 64;
const EXPIRES_END: usize = 72;

/// Entry point a claim instruction dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimEntryPoint {
    /// Production entry point with full day sequencing.
    Claim,
    /// Development entry point bypassing day sequencing.
    ClaimDev,
}

/// Decoded claim instruction data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimInstruction {
    /// Entry point selected by the discriminator.
    pub entry_point: ClaimEntryPoint,
    /// UTC day number being claimed.
    pub day: i64,
    /// Commitment to the external detection proof.
    pub session_hash: SessionHash,
    /// Caller-chosen replay-scoping nonce.
    pub nonce: Nonce,
    /// Unix-seconds attestation deadline.
    pub expires_at: i64,
    /// Detached oracle signature over the reconstructed payload.
    pub signature: [u8; 64],
}

/// Error decoding a claim instruction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstructionError {
    /// The buffer is not exactly [`CLAIM_INSTRUCTION_SIZE`] bytes.
    #[error("claim instruction must be exactly {CLAIM_INSTRUCTION_SIZE} bytes, got {0}")]
    Length(usize),
    /// The leading 8 bytes match no known entry point.
    #[error("unknown claim instruction discriminator {0:02x?}")]
    UnknownDiscriminator([u8; 8]),
}

fn discriminator(entry_point_name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{entry_point_name}").as_bytes());
    let mut out = [0_u8; 8];
    out.copy_from_slice(digest.get(..8).expect("SHA-256 digest is 32 bytes"));
    out
}

/// Discriminator of the production `claim` entry point.
#[must_use]
pub fn claim_discriminator() -> [u8; 8] {
    discriminator("claim")
}

/// Discriminator of the development `claim_dev` entry point.
#[must_use]
pub fn claim_dev_discriminator() -> [u8; 8] {
    discriminator("claim_dev")
}

#[allow(
    clippy::indexing_slicing,
    reason = "Offsets are compile-time constants within the fixed 136-byte buffer"
)]
impl ClaimInstruction {
    /// Encode into the 136-byte wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; CLAIM_INSTRUCTION_SIZE] {
        let discriminator = match self.entry_point {
            ClaimEntryPoint::Claim => claim_discriminator(),
            ClaimEntryPoint::ClaimDev => claim_dev_discriminator(),
        };
        let mut buf = [0_u8; CLAIM_INSTRUCTION_SIZE];
        buf[..DISCRIMINATOR_END].copy_from_slice(&discriminator);
        buf[DISCRIMINATOR_END..DAY_END].copy_from_slice(&self.day.to_le_bytes());
        buf[DAY_END..SESSION_END].copy_from_slice(self.session_hash.as_bytes());
        buf[SESSION_END..NONCE_END].copy_from_slice(self.nonce.as_bytes());
        buf[NONCE_END..EXPIRES_END].copy_from_slice(&self.expires_at.to_le_bytes());
        buf[EXPIRES_END..].copy_from_slice(&self.signature);
        buf
    }

    /// Decode from wire bytes.
    ///
    /// # Errors
    /// Returns an error on wrong length or an unknown discriminator.
    pub fn decode(bytes: &[u8]) -> Result<Self, InstructionError> {
        let buf: &[u8; CLAIM_INSTRUCTION_SIZE] = bytes
            .try_into()
            .map_err(|_| InstructionError::Length(bytes.len()))?;

        let discriminator: [u8; 8] = buf[..DISCRIMINATOR_END]
            .try_into()
            .expect("fixed slice length");
        let entry_point = if discriminator == claim_discriminator() {
            ClaimEntryPoint::Claim
        } else if discriminator == claim_dev_discriminator() {
            ClaimEntryPoint::ClaimDev
        } else {
            return Err(InstructionError::UnknownDiscriminator(discriminator));
        };

        let day = i64::from_le_bytes(
            buf[DISCRIMINATOR_END..DAY_END]
                .try_into()
                .expect("fixed slice"),
        );
        let session_hash: [u8; 32] = buf[DAY_END..SESSION_END]
            .try_into()
            .expect("fixed slice length");
        let nonce: [u8; 16] = buf[SESSION_END..NONCE_END]
            .try_into()
            .expect("fixed slice length");
        let expires_at =
            i64::from_le_bytes(buf[NONCE_END..EXPIRES_END].try_into().expect("fixed slice"));
        let signature: [u8; 64] = buf[EXPIRES_END..].try_into().expect("fixed slice length");

        Ok(Self {
            entry_point,
            day,
            session_hash: session_hash.into(),
            nonce: nonce.into(),
            expires_at,
            signature,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Test code should panic on invalid data"
)]
mod tests {
    use test_utils::{b16, b32};

    use super::*;

    fn sample(entry_point: ClaimEntryPoint) -> ClaimInstruction {
        ClaimInstruction {
            entry_point,
            day: 100,
            session_hash: b32!(9),
            nonce: b16!(8),
            expires_at: 8_640_060,
            signature: [5_u8; 64],
        }
    }

    #[test]
    fn encode_is_exactly_136_bytes() {
        assert_eq!(
            sample(ClaimEntryPoint::Claim).encode().len(),
            CLAIM_INSTRUCTION_SIZE
        );
    }

    #[test]
    fn round_trip_both_entry_points() {
        for entry_point in [ClaimEntryPoint::Claim, ClaimEntryPoint::ClaimDev] {
            let instruction = sample(entry_point);
            let decoded =
                ClaimInstruction::decode(&instruction.encode()).expect("decode should succeed");
            assert_eq!(decoded, instruction);
        }
    }

    #[test]
    fn discriminators_differ() {
        assert_ne!(claim_discriminator(), claim_dev_discriminator());
    }

    #[test]
    fn decode_rejects_unknown_discriminator() {
        let mut bytes = sample(ClaimEntryPoint::Claim).encode();
        bytes[0] ^= 0xff;
        assert!(matches!(
            ClaimInstruction::decode(&bytes),
            Err(InstructionError::UnknownDiscriminator(_))
        ));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            ClaimInstruction::decode(&[0_u8; 135]),
            Err(InstructionError::Length(135))
        );
    }
}
