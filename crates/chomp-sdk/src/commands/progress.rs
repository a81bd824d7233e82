//! Progress account command implementations.

use std::path::PathBuf;

use chomp_core::base::UserId;
use eyre::Context as _;
use tracing::info;

use crate::commands::submit_claim::write_progress_file;
use crate::common::open_ledger;

/// Idempotently create the progress account for a user.
///
/// # Errors
/// Returns an error on storage failure.
pub async fn init_progress(
    ledger_path: PathBuf,
    oracle_pubkey: String,
    user: UserId,
) -> eyre::Result<()> {
    let ledger = open_ledger(&ledger_path, &oracle_pubkey)?;
    let progress = ledger
        .init_user(&user)
        .context("Failed to initialize progress account")?;
    info!(
        user = %user,
        streak = progress.streak,
        total_claims = progress.total_claims,
        "progress account ready"
    );
    Ok(())
}

/// Read and report a user's progress record.
///
/// # Errors
/// Returns an error on storage failure or when no record exists.
pub async fn show_progress(
    ledger_path: PathBuf,
    oracle_pubkey: String,
    user: UserId,
    progress_output_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let ledger = open_ledger(&ledger_path, &oracle_pubkey)?;
    let progress = ledger
        .progress_of(&user)
        .context("Failed to read progress account")?
        .ok_or_else(|| eyre::eyre!("No progress record exists for {user}"))?;

    info!(
        user = %user,
        streak = progress.streak,
        last_day_claimed = progress.last_day_claimed,
        total_claims = progress.total_claims,
        "progress"
    );
    if let Some(path) = progress_output_file {
        write_progress_file(&path, &progress).await?;
        info!(file = ?path, "progress written");
    }
    Ok(())
}
