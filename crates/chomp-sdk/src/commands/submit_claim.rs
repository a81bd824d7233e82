//! Claim submission command implementation.

use std::path::{Path, PathBuf};

use chomp_core::base::UserId;
use chomp_core::bytes::from_base64_exact;
use chomp_core::payload::{ClaimPayload, PAYLOAD_SIZE};
use chomp_core::schema::oracle::SignResponse;
use chomp_core::schema::progress::UserProgress;
use chomp_ledger::instruction::{ClaimEntryPoint, ClaimInstruction};
use eyre::{Context as _, ensure};
use tracing::info;

use crate::commands::request_attestation::read_attestation_file;
use crate::common::{open_ledger, unix_now};
use crate::identity::{read_seed_file, user_id_from_seed};

/// Submit one attestation as one atomic claim.
///
/// The flow is the ledger transaction of the protocol: an idempotent
/// account-init, then a single instruction carrying the payload fields and
/// the oracle signature. The ledger reconstructs the payload from the
/// caller's identity and verifies before any state is touched.
///
/// # Errors
/// Returns an error if the attestation is malformed, its embedded user is
/// not the caller, or the ledger rejects the claim.
pub async fn submit_claim(
    ledger_path: &Path,
    oracle_pubkey: &str,
    caller: UserId,
    attestation: &SignResponse,
    dev: bool,
) -> eyre::Result<UserProgress> {
    let payload_bytes: [u8; PAYLOAD_SIZE] = from_base64_exact(&attestation.payload_b64)
        .context("Attestation payload is not a valid base64 100-byte value")?;
    let payload = ClaimPayload::decode(&payload_bytes).context("Attestation payload is invalid")?;
    ensure!(
        payload.user == caller,
        "Attestation is bound to {}, not to the submitting identity {caller}",
        payload.user
    );
    let signature: [u8; 64] = from_base64_exact(&attestation.sig_b64)
        .context("Attestation signature is not a valid base64 64-byte value")?;

    let entry_point = if dev {
        ClaimEntryPoint::ClaimDev
    } else {
        ClaimEntryPoint::Claim
    };
    let instruction = ClaimInstruction {
        entry_point,
        day: payload.day,
        session_hash: payload.session_hash,
        nonce: payload.nonce,
        expires_at: payload.expires_at,
        signature,
    };

    let ledger = open_ledger(ledger_path, oracle_pubkey)?;
    ledger
        .init_user(&caller)
        .context("Failed to initialize progress account")?;

    let now = unix_now()?;
    let progress = ledger
        .execute(&caller, &instruction.encode(), now)
        .context("Claim rejected")?;
    info!(
        user = %caller,
        day = payload.day,
        streak = progress.streak,
        total_claims = progress.total_claims,
        "claim accepted"
    );
    Ok(progress)
}

/// Submit a stored attestation file, optionally writing the updated progress.
///
/// # Errors
/// Returns an error if any step fails.
pub async fn submit_attestation(
    attestation_file: PathBuf,
    seed_file: PathBuf,
    ledger_path: PathBuf,
    oracle_pubkey: String,
    dev: bool,
    progress_output_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let seed = read_seed_file(&seed_file).await?;
    let caller = user_id_from_seed(&seed);

    let attestation = read_attestation_file(&attestation_file).await?;
    let progress = submit_claim(&ledger_path, &oracle_pubkey, caller, &attestation, dev).await?;

    if let Some(path) = progress_output_file {
        write_progress_file(&path, &progress).await?;
        info!(file = ?path, "progress written");
    }
    Ok(())
}

/// Persist a progress record as pretty JSON.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub(crate) async fn write_progress_file(
    path: &Path,
    progress: &UserProgress,
) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(progress)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write progress file {}", path.display()))?;
    Ok(())
}
