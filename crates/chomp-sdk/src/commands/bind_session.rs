//! Detection-proof binding command implementation.

use std::path::Path;

use chomp_core::base::{SessionHash, UserId};
use chomp_core::schema::session::DetectionProof;
use eyre::{Context as _, ensure};
use tracing::info;

/// Bind a detector proof document to the claimant identity.
///
/// The document is parsed only to confirm it describes a completed session;
/// the commitment is computed over the raw bytes exactly as read, so any
/// later mutation of the file produces a different session hash.
///
/// # Errors
/// Returns an error if the file cannot be read, is not a detection proof, or
/// does not describe a completed session.
pub async fn bind_session(user: &UserId, proof_file: &Path) -> eyre::Result<SessionHash> {
    let proof_bytes = tokio::fs::read(proof_file)
        .await
        .with_context(|| format!("Failed to read detection proof {}", proof_file.display()))?;

    let proof: DetectionProof =
        serde_json::from_slice(&proof_bytes).context("Failed to parse detection proof JSON")?;
    ensure!(
        proof.is_complete(),
        "Detection proof event is '{}', not a completed session",
        proof.event
    );

    let session_hash = SessionHash::bind(user, &proof_bytes);
    info!(
        user = %user,
        session_hash = %session_hash,
        model = %proof.model,
        "detection proof bound to claimant identity"
    );
    Ok(session_hash)
}
