//! Oracle attestation request command implementation.

use std::path::{Path, PathBuf};

use chomp_core::base::{Nonce, SessionHash, UserId, day_number};
use chomp_core::bytes::from_base64_exact;
use chomp_core::payload::{ClaimPayload, PAYLOAD_SIZE};
use chomp_core::schema::oracle::{SignRequest, SignResponse};
use eyre::{Context as _, ensure};
use tracing::info;

use crate::commands::bind_session;
use crate::common::{DEFAULT_EXPIRY_SLACK_SECS, unix_now};
use crate::identity::{read_seed_file, user_id_from_seed};
use crate::oracle_client::OracleClient;

/// Request an oracle signature over a claim for `day`.
///
/// After the oracle answers, the payload is re-encoded locally from the same
/// logical input and compared byte-for-byte against the oracle's echoed
/// payload. Divergence means a compromised or buggy transport, or a
/// serialization bug on either side; the claim is abandoned before anything
/// reaches the ledger.
///
/// # Errors
/// Returns an error on transport failure, oracle refusal, an unexpected
/// signer identity, or a payload mismatch.
pub async fn request_attestation(
    client: &OracleClient,
    expected_oracle_pubkey: &str,
    user: UserId,
    day: i64,
    session_hash: SessionHash,
    now: i64,
) -> eyre::Result<SignResponse> {
    let nonce = Nonce::random();
    let expires_at = now.saturating_add(DEFAULT_EXPIRY_SLACK_SECS);

    let request = SignRequest {
        user: user.to_string(),
        day,
        session_hash: session_hash.to_string(),
        nonce: nonce.to_string(),
        expires_at,
    };
    let response = client.sign(&request).await?;

    ensure!(
        response.oracle_pubkey == expected_oracle_pubkey,
        "Oracle answered with unexpected signer identity {} (expected {expected_oracle_pubkey})",
        response.oracle_pubkey
    );

    let echoed: [u8; PAYLOAD_SIZE] = from_base64_exact(&response.payload_b64)
        .context("Oracle payload is not a valid base64 100-byte value")?;
    let local = ClaimPayload {
        user,
        day,
        session_hash,
        nonce,
        expires_at,
    }
    .encode();
    ensure!(
        echoed == local,
        "Oracle payload differs from the locally encoded payload; refusing to submit \
         (possible transport tampering or serialization bug)"
    );

    let _: [u8; 64] = from_base64_exact(&response.sig_b64)
        .context("Oracle signature is not a valid base64 64-byte value")?;

    info!(user = %user, day, nonce = %nonce, expires_at, "attestation received and cross-checked");
    Ok(response)
}

/// Bind a proof and request an attestation, writing it to a file.
///
/// # Errors
/// Returns an error if any pipeline step fails.
#[allow(clippy::too_many_arguments, reason = "CLI entrypoint parameters")]
pub async fn attest_claim(
    proof_file: PathBuf,
    seed_file: PathBuf,
    oracle_url: String,
    oracle_pubkey: String,
    day: Option<i64>,
    attestation_output_file: PathBuf,
) -> eyre::Result<()> {
    let seed = read_seed_file(&seed_file).await?;
    let user = user_id_from_seed(&seed);

    let session_hash = bind_session(&user, &proof_file).await?;

    let now = unix_now()?;
    let day = day.unwrap_or_else(|| day_number(now));

    let client = OracleClient::new(oracle_url);
    let attestation =
        request_attestation(&client, &oracle_pubkey, user, day, session_hash, now).await?;

    write_attestation_file(&attestation_output_file, &attestation).await?;
    info!(file = ?attestation_output_file, "attestation written");
    Ok(())
}

/// Persist an attestation document as pretty JSON.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub(crate) async fn write_attestation_file(
    path: &Path,
    attestation: &SignResponse,
) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(attestation)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write attestation file {}", path.display()))?;
    Ok(())
}

/// Load an attestation document from a file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub(crate) async fn read_attestation_file(path: &Path) -> eyre::Result<SignResponse> {
    serde_json::from_str(
        &tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read attestation file {}", path.display()))?,
    )
    .context("Failed to parse attestation JSON")
}
