//! End-to-end claim pipeline orchestrator.

use std::path::PathBuf;

use chomp_core::base::day_number;
use eyre::Context as _;
use tracing::info;

use crate::commands::bind_session;
use crate::commands::request_attestation::{request_attestation, write_attestation_file};
use crate::commands::submit_claim::{submit_claim, write_progress_file};
use crate::common::unix_now;
use crate::identity::{read_seed_file, user_id_from_seed};
use crate::oracle_client::OracleClient;

/// Inputs for the full claim pipeline.
#[derive(Debug)]
pub struct ClaimRunArgs {
    /// Detection proof document to bind.
    pub proof_file: PathBuf,
    /// Wallet identity seed file.
    pub seed_file: PathBuf,
    /// Oracle base URL.
    pub oracle_url: String,
    /// Expected base58 oracle signer identity.
    pub oracle_pubkey: String,
    /// Ledger store path.
    pub ledger_path: PathBuf,
    /// Day override; defaults to the current UTC day.
    pub day: Option<i64>,
    /// Use the development entry point (no day sequencing).
    pub dev: bool,
    /// Where to persist the received attestation, if anywhere.
    pub attestation_output_file: Option<PathBuf>,
    /// Where to persist the updated progress, if anywhere.
    pub progress_output_file: Option<PathBuf>,
}

/// Run the full claim pipeline: `claim bind -> claim attest -> claim submit`.
///
/// A single forward pass with no automatic retries; the first failing step
/// abandons the whole flow with no partial ledger effects.
///
/// # Errors
/// Returns an error if any pipeline step fails.
pub async fn claim_run(args: ClaimRunArgs) -> eyre::Result<()> {
    let seed = read_seed_file(&args.seed_file).await?;
    let user = user_id_from_seed(&seed);

    let session_hash = bind_session(&user, &args.proof_file).await?;

    let now = unix_now()?;
    let day = args.day.unwrap_or_else(|| day_number(now));

    let client = OracleClient::new(args.oracle_url);
    let attestation = request_attestation(
        &client,
        &args.oracle_pubkey,
        user,
        day,
        session_hash,
        now,
    )
    .await
    .context("Attestation step failed")?;

    if let Some(path) = &args.attestation_output_file {
        write_attestation_file(path, &attestation).await?;
        info!(file = ?path, "attestation written");
    }

    let progress = submit_claim(
        &args.ledger_path,
        &args.oracle_pubkey,
        user,
        &attestation,
        args.dev,
    )
    .await?;

    if let Some(path) = &args.progress_output_file {
        write_progress_file(path, &progress).await?;
        info!(file = ?path, "progress written");
    }

    info!(
        user = %user,
        day,
        streak = progress.streak,
        total_claims = progress.total_claims,
        "claim pipeline complete"
    );
    Ok(())
}
