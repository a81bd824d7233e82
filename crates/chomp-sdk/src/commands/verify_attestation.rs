//! Offline attestation verification command implementation.

use std::path::PathBuf;

use chomp_core::bytes::from_base64_exact;
use chomp_core::payload::{ClaimPayload, PAYLOAD_SIZE};
use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};
use eyre::{Context as _, ensure};
use tracing::{info, warn};

use crate::commands::request_attestation::read_attestation_file;
use crate::common::parse_oracle_pubkey;

/// Verify a stored attestation file without consulting oracle or ledger.
///
/// Recomputes nothing about the claim itself — this checks only that the
/// signature covers the exact payload bytes under the stated signer, the
/// same check the ledger performs first.
///
/// # Errors
/// Returns an error if the file is malformed or the signature is invalid.
pub async fn verify_attestation_file(attestation_file: PathBuf) -> eyre::Result<()> {
    let attestation = read_attestation_file(&attestation_file).await?;

    let public_key = parse_oracle_pubkey(&attestation.oracle_pubkey)?;
    let payload_bytes: [u8; PAYLOAD_SIZE] = from_base64_exact(&attestation.payload_b64)
        .context("Attestation payload is not a valid base64 100-byte value")?;
    let signature: [u8; 64] = from_base64_exact(&attestation.sig_b64)
        .context("Attestation signature is not a valid base64 64-byte value")?;
    let payload = ClaimPayload::decode(&payload_bytes).context("Attestation payload is invalid")?;

    let verifying_key = VerifyingKey::from_bytes(&public_key)
        .map_err(|_| eyre::eyre!("Attestation signer is not a valid ed25519 key"))?;
    let is_valid = verifying_key
        .verify(&payload_bytes, &Signature::from_bytes(&signature))
        .is_ok();

    if is_valid {
        info!(
            user = %payload.user,
            day = payload.day,
            expires_at = payload.expires_at,
            "attestation signature VALID"
        );
    } else {
        warn!(user = %payload.user, day = payload.day, "attestation signature INVALID");
    }
    ensure!(is_valid, "Attestation signature failed verification");
    Ok(())
}
