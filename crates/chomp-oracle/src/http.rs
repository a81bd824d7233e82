//! HTTP surface.
//!
//! Three routes: `POST /oracle/sign` (validate and sign), `POST /verify`
//! (pure signature check, no ledger state) and `GET /health` (liveness).
//! Validation failures surface as `400 {"error": ...}`; nothing about the
//! signing key beyond its public identity is ever in a response.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use chomp_core::bytes::{from_base64_exact, to_base64};
use chomp_core::schema::oracle::{
    ErrorResponse, SignRequest, SignResponse, VerifyRequest, VerifyResponse,
};
use tracing::{info, warn};

use crate::attest::attest;
use crate::keys::{OracleKeypair, verify_detached};

/// Shared, immutable service state.
#[derive(Clone)]
pub struct AppState {
    keypair: Arc<OracleKeypair>,
    max_expiry_window_secs: i64,
}

impl AppState {
    /// Bundle the injected keypair and freshness window.
    #[must_use]
    pub fn new(keypair: OracleKeypair, max_expiry_window_secs: i64) -> Self {
        Self {
            keypair: Arc::new(keypair),
            max_expiry_window_secs,
        }
    }
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            Self::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Current unix time in seconds from the oracle's own clock.
fn unix_now() -> Result<i64, ApiError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| ApiError::Internal("oracle clock is before the unix epoch".to_owned()))?;
    i64::try_from(elapsed.as_secs())
        .map_err(|_| ApiError::Internal("oracle clock overflow".to_owned()))
}

/// Build the oracle router over shared state.
#[must_use]
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/oracle/sign", post(sign_handler))
        .route("/verify", post(verify_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind `addr` and serve the oracle until the process exits.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, oracle_pubkey = %state.keypair.public_key_base58(), "oracle listening");
    axum::serve(listener, app_router(state)).await?;
    Ok(())
}

async fn sign_handler(
    State(state): State<AppState>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignResponse>, ApiError> {
    let now = unix_now()?;
    let attestation = attest(&state.keypair, &request, now, state.max_expiry_window_secs)
        .map_err(|e| {
            warn!(user = %request.user, day = request.day, error = %e, "signing request refused");
            ApiError::BadRequest(e.to_string())
        })?;
    info!(user = %request.user, day = request.day, "attestation signed");
    Ok(Json(SignResponse {
        oracle_pubkey: attestation.oracle_pubkey,
        payload_b64: to_base64(&attestation.payload_bytes),
        sig_b64: to_base64(&attestation.signature),
    }))
}

async fn verify_handler(
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let public_key: [u8; 32] = bs58::decode(&request.oracle_pubkey)
        .into_vec()
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| ApiError::BadRequest("oraclePubkey: invalid base58 key".to_owned()))?;
    let payload: [u8; 100] = from_base64_exact(&request.payload_b64)
        .map_err(|e| ApiError::BadRequest(format!("payloadB64: {e}")))?;
    let signature: [u8; 64] = from_base64_exact(&request.sig_b64)
        .map_err(|e| ApiError::BadRequest(format!("sigB64: {e}")))?;

    Ok(Json(VerifyResponse {
        ok: verify_detached(&public_key, &payload, &signature),
    }))
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use chomp_core::base::UserId;
    use chomp_core::payload::ClaimPayload;
    use test_utils::b32;

    use super::*;
    use crate::attest::MAX_EXPIRY_WINDOW_SECS;

    fn state() -> AppState {
        AppState::new(
            OracleKeypair::from_seed(&[7_u8; 32]),
            MAX_EXPIRY_WINDOW_SECS,
        )
    }

    fn sign_request(expires_at: i64) -> SignRequest {
        let user: UserId = b32!(1);
        SignRequest {
            user: user.to_string(),
            day: 100,
            session_hash: hex::encode([2_u8; 32]),
            nonce: hex::encode([3_u8; 16]),
            expires_at,
        }
    }

    fn now() -> i64 {
        unix_now().map_or(0, |now| now)
    }

    #[tokio::test]
    async fn sign_handler_returns_verifiable_attestation() {
        let state = state();
        let Json(response) = sign_handler(
            State(state.clone()),
            Json(sign_request(now().saturating_add(60))),
        )
        .await
        .expect("sign should succeed");

        let Json(verdict) = verify_handler(Json(VerifyRequest {
            oracle_pubkey: response.oracle_pubkey,
            payload_b64: response.payload_b64.clone(),
            sig_b64: response.sig_b64,
        }))
        .await
        .expect("verify should parse");
        assert!(verdict.ok);

        let payload_bytes: [u8; 100] =
            from_base64_exact(&response.payload_b64).expect("payload decodes");
        let payload = ClaimPayload::decode(&payload_bytes).expect("payload parses");
        assert_eq!(payload.day, 100);
    }

    #[tokio::test]
    async fn sign_handler_refuses_stale_deadline() {
        let result = sign_handler(
            State(state()),
            Json(sign_request(now().saturating_sub(10))),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn verify_handler_reports_false_for_wrong_key() {
        let state = state();
        let Json(response) = sign_handler(
            State(state),
            Json(sign_request(now().saturating_add(60))),
        )
        .await
        .expect("sign should succeed");

        let other = OracleKeypair::from_seed(&[8_u8; 32]);
        let Json(verdict) = verify_handler(Json(VerifyRequest {
            oracle_pubkey: other.public_key_base58(),
            payload_b64: response.payload_b64,
            sig_b64: response.sig_b64,
        }))
        .await
        .expect("verify should parse");
        assert!(!verdict.ok);
    }

    #[tokio::test]
    async fn verify_handler_rejects_undecodable_fields() {
        let result = verify_handler(Json(VerifyRequest {
            oracle_pubkey: "tooshort".to_owned(),
            payload_b64: "AAAA".to_owned(),
            sig_b64: "AAAA".to_owned(),
        }))
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn black_box_http_round_trip() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let state = state();
        tokio::spawn(async move {
            axum::serve(listener, app_router(state))
                .await
                .expect("serve");
        });

        let base = format!("http://{addr}");
        let expires_at = now().saturating_add(60);
        tokio::task::spawn_blocking(move || {
            let health = ureq::get(format!("{base}/health"))
                .call()
                .expect("health endpoint");
            assert_eq!(health.status(), 200);

            let mut response = ureq::post(format!("{base}/oracle/sign"))
                .send_json(serde_json::json!({
                    "user": UserId::new([0_u8; 32]).to_string(),
                    "day": 100,
                    "sessionHash": hex::encode([2_u8; 32]),
                    "nonce": hex::encode([3_u8; 16]),
                    "expiresAt": expires_at,
                }))
                .expect("sign endpoint");
            let signed: SignResponse = response.body_mut().read_json().expect("sign body");

            let mut response = ureq::post(format!("{base}/verify"))
                .send_json(serde_json::json!({
                    "oraclePubkey": signed.oracle_pubkey,
                    "payloadB64": signed.payload_b64,
                    "sigB64": signed.sig_b64,
                }))
                .expect("verify endpoint");
            let verdict: VerifyResponse = response.body_mut().read_json().expect("verify body");
            assert!(verdict.ok);

            // stale deadline refused with a 400 error body
            let err = ureq::post(format!("{base}/oracle/sign"))
                .send_json(serde_json::json!({
                    "user": UserId::new([0_u8; 32]).to_string(),
                    "day": 100,
                    "sessionHash": hex::encode([2_u8; 32]),
                    "nonce": hex::encode([3_u8; 16]),
                    "expiresAt": 0,
                }))
                .expect_err("stale deadline must be a 400");
            if let ureq::Error::StatusCode(code) = err {
                assert_eq!(code, 400);
            } else {
                panic!("unexpected transport error: {err}");
            }
        })
        .await
        .expect("blocking client");
    }
}
