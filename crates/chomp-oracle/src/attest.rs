//! Request validation and signing.
//!
//! Every check here is a request-shape or freshness check, never a content
//! check: whether the session commitment reflects a real detection event is
//! outside the oracle's trust boundary.

use chomp_core::base::UserId;
use chomp_core::bytes::parse_fixed_bytes;
use chomp_core::payload::{ClaimPayload, PAYLOAD_SIZE};
use chomp_core::schema::oracle::SignRequest;
use thiserror::Error;

use crate::keys::OracleKeypair;

/// Default upper bound in seconds on `expires_at - now`.
///
/// Bounds the blast radius of a leaked attestation.
pub const MAX_EXPIRY_WINDOW_SECS: i64 = 180;

/// A freshly produced attestation: payload, detached signature, signer.
///
/// Ephemeral; consumed once by the ledger and never stored oracle-side.
#[derive(Debug, Clone)]
pub struct Attestation {
    /// Base58 public identity the signature verifies against.
    pub oracle_pubkey: String,
    /// The exact 100 bytes that were signed.
    pub payload_bytes: [u8; PAYLOAD_SIZE],
    /// Detached ed25519 signature over `payload_bytes`.
    pub signature: [u8; 64],
}

/// Reasons a signing request is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttestError {
    /// A field is missing, mis-encoded or the wrong size.
    #[error("invalid request shape: {0}")]
    InvalidRequestShape(String),
    /// The requested deadline falls outside the freshness window.
    #[error("attestation window violation: {0}")]
    WindowViolation(String),
}

/// Validate a signing request and produce an attestation.
///
/// `now` is read once by the caller from the oracle's own clock; it is never
/// taken from the request.
///
/// # Errors
/// Returns [`AttestError::InvalidRequestShape`] for malformed fields and
/// [`AttestError::WindowViolation`] for deadlines in the past or further out
/// than `max_window_secs`. The boundary `now + max_window_secs` is accepted.
pub fn attest(
    keypair: &OracleKeypair,
    request: &SignRequest,
    now: i64,
    max_window_secs: i64,
) -> Result<Attestation, AttestError> {
    let user = UserId::from_base58(&request.user)
        .map_err(|e| AttestError::InvalidRequestShape(format!("user: {e}")))?;
    let session_hash: [u8; 32] = parse_fixed_bytes(&request.session_hash)
        .map_err(|e| AttestError::InvalidRequestShape(format!("sessionHash: {e}")))?;
    let nonce: [u8; 16] = parse_fixed_bytes(&request.nonce)
        .map_err(|e| AttestError::InvalidRequestShape(format!("nonce: {e}")))?;

    if request.expires_at < now {
        return Err(AttestError::WindowViolation(format!(
            "expiresAt {} is in the past (now {now})",
            request.expires_at
        )));
    }
    let window_end = now.saturating_add(max_window_secs);
    if request.expires_at > window_end {
        return Err(AttestError::WindowViolation(format!(
            "expiresAt {} exceeds now + {max_window_secs}s",
            request.expires_at
        )));
    }

    let payload = ClaimPayload {
        user,
        day: request.day,
        session_hash: session_hash.into(),
        nonce: nonce.into(),
        expires_at: request.expires_at,
    };
    let payload_bytes = payload.encode();
    let signature = keypair.sign(&payload_bytes);

    Ok(Attestation {
        oracle_pubkey: keypair.public_key_base58(),
        payload_bytes,
        signature,
    })
}
