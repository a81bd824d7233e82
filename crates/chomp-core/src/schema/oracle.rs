//! Oracle HTTP surface schema models.
//!
//! Byte-valued fields are carried as strings so malformed values surface as
//! oracle validation errors (HTTP 400 with a reason) instead of opaque
//! deserialization failures: `user` is base58, `sessionHash`/`nonce` accept
//! hex or base64, and response payloads/signatures are base64.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /oracle/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    /// Base58 claimant public key.
    pub user: String,
    /// UTC day number being claimed.
    pub day: i64,
    /// 32-byte session commitment, hex or base64.
    pub session_hash: String,
    /// 16-byte replay nonce, hex or base64.
    pub nonce: String,
    /// Unix-seconds attestation deadline.
    pub expires_at: i64,
}

/// Successful response of `POST /oracle/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    /// Base58 oracle public key the signature verifies against.
    pub oracle_pubkey: String,
    /// Base64 100-byte encoded payload, exactly as signed.
    pub payload_b64: String,
    /// Base64 64-byte detached ed25519 signature.
    pub sig_b64: String,
}

/// Body of `POST /verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Base58 public key to verify against.
    pub oracle_pubkey: String,
    /// Base64 100-byte payload.
    pub payload_b64: String,
    /// Base64 64-byte signature.
    pub sig_b64: String,
}

/// Response of `POST /verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Whether the signature verifies for the exact payload bytes.
    pub ok: bool,
}

/// Error body returned with HTTP 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the violated constraint.
    pub error: String,
}

/// Deployment configuration for the attestation oracle service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OracleConfig {
    /// Socket address the HTTP service listens on.
    pub listen_addr: String,
    /// Path to the hex-encoded 32-byte signing seed file.
    pub key_file: String,
    /// Upper bound in seconds on `expiresAt - now` accepted by `sign`.
    pub max_expiry_window_secs: i64,
}
