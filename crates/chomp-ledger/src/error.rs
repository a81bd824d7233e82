//! Ledger error taxonomy.

use chomp_core::payload::PayloadError;
use thiserror::Error;

use crate::instruction::InstructionError;
use crate::record::RecordError;

/// Reasons a claim transition rejects or the store fails.
///
/// Every variant is terminal for the current attempt and leaves no partial
/// state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The payload bytes do not decode.
    #[error("malformed claim payload: {0}")]
    MalformedPayload(#[from] PayloadError),
    /// The instruction data does not decode.
    #[error("malformed claim instruction: {0}")]
    MalformedInstruction(#[from] InstructionError),
    /// The attestation signature does not verify against the oracle key.
    #[error("attestation signature does not verify against the oracle key")]
    InvalidSignature,
    /// The payload's embedded user differs from the authenticated caller.
    #[error("payload user does not match the authenticated caller")]
    UserMismatch,
    /// The attestation deadline has passed.
    #[error("attestation expired at {expires_at}, ledger time is {now}")]
    AttestationExpired {
        /// Deadline embedded in the payload.
        expires_at: i64,
        /// Ledger clock at verification time.
        now: i64,
    },
    /// A replay record for this (user, nonce) already exists.
    #[error("nonce already used for this user")]
    NonceAlreadyUsed,
    /// A second claim for an already-claimed day.
    #[error("day {day} already claimed")]
    DaySequenceRejected {
        /// The rejected day number.
        day: i64,
    },
    /// The configured oracle public key bytes are not a valid ed25519 key.
    #[error("invalid oracle public key")]
    InvalidOracleKey,
    /// A stored progress record failed to decode.
    #[error("corrupt progress record: {0}")]
    CorruptRecord(#[from] RecordError),
    /// Underlying storage failure.
    #[error("ledger storage error: {0}")]
    Storage(#[from] sled::Error),
}
