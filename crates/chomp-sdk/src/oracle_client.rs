//! HTTP client for the attestation oracle.

use chomp_core::schema::oracle::{
    ErrorResponse, SignRequest, SignResponse, VerifyRequest, VerifyResponse,
};
use eyre::{Context as _, ensure};
use reqwest::StatusCode;

/// Thin typed client over the oracle HTTP surface.
#[derive(Debug, Clone)]
pub struct OracleClient {
    base_url: String,
    http: reqwest::Client,
}

impl OracleClient {
    /// Client for an oracle at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Request a signature over a claim payload.
    ///
    /// # Errors
    /// Returns an error on transport failure, or with the oracle's stated
    /// reason when the request is refused with HTTP 400.
    pub async fn sign(&self, request: &SignRequest) -> eyre::Result<SignResponse> {
        let response = self
            .http
            .post(format!("{}/oracle/sign", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to reach the oracle")?;

        if response.status() == StatusCode::BAD_REQUEST {
            let refusal: ErrorResponse = response
                .json()
                .await
                .context("Oracle refused the request with an unreadable error body")?;
            eyre::bail!("Oracle refused the signing request: {}", refusal.error);
        }
        ensure!(
            response.status().is_success(),
            "Oracle returned unexpected status {}",
            response.status()
        );

        response
            .json()
            .await
            .context("Failed to parse oracle sign response")
    }

    /// Check a detached signature through the oracle's pure verify endpoint.
    ///
    /// # Errors
    /// Returns an error on transport failure or an undecodable request.
    pub async fn verify(&self, request: &VerifyRequest) -> eyre::Result<bool> {
        let response = self
            .http
            .post(format!("{}/verify", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to reach the oracle")?;
        ensure!(
            response.status().is_success(),
            "Oracle returned unexpected status {}",
            response.status()
        );
        let verdict: VerifyResponse = response
            .json()
            .await
            .context("Failed to parse oracle verify response")?;
        Ok(verdict.ok)
    }

    /// Liveness probe.
    ///
    /// # Errors
    /// Returns an error if the oracle is unreachable or unhealthy.
    pub async fn health(&self) -> eyre::Result<()> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .context("Failed to reach the oracle")?;
        ensure!(
            response.status().is_success(),
            "Oracle health check returned {}",
            response.status()
        );
        Ok(())
    }
}
