//! Signing-key resource.
//!
//! The oracle's key is process-wide singleton state: loaded once at startup,
//! injected into the HTTP state, never mutated at runtime. Only the derived
//! public identity ever leaves this module.

use std::path::Path;

use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use eyre::{Context as _, ensure};
use rand_core::OsRng;
use zeroize::Zeroize as _;

/// Size in bytes of a signing seed.
pub const SEED_SIZE: usize = 32;

/// The oracle's long-lived signing keypair.
#[derive(Debug)]
pub struct OracleKeypair {
    signing_key: SigningKey,
}

impl OracleKeypair {
    /// Generate a fresh keypair from the operating system CSPRNG.
    ///
    /// Meant for development and tests; deployments load a seed file.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a keypair from raw seed bytes.
    #[must_use]
    pub fn from_seed(seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse a hex-encoded seed string.
    ///
    /// The intermediate buffers are zeroized before returning.
    ///
    /// # Errors
    /// Returns an error if the string is not hex or not exactly 32 bytes.
    pub fn from_hex(seed_hex: &str) -> eyre::Result<Self> {
        let mut bytes = hex::decode(seed_hex).context("Invalid hex seed")?;
        if bytes.len() != SEED_SIZE {
            let got = bytes.len();
            bytes.zeroize();
            eyre::bail!("Seed must be exactly {SEED_SIZE} bytes (64 hex characters), got {got}");
        }

        let mut seed = [0_u8; SEED_SIZE];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();

        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Read a seed file containing a hex seed and build the keypair.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the seed is invalid.
    pub async fn read_key_file(path: &Path) -> eyre::Result<Self> {
        let seed_hex = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read oracle key file {}", path.display()))?;
        Self::from_hex(seed_hex.trim())
    }

    /// Write a freshly generated seed to `path` as hex.
    ///
    /// # Errors
    /// Returns an error if the seed cannot be written, or if a file already
    /// exists at `path` (an existing key is never overwritten).
    pub async fn generate_key_file(path: &Path) -> eyre::Result<Self> {
        ensure!(
            !path.exists(),
            "Refusing to overwrite existing key file {}",
            path.display()
        );
        let keypair = Self::generate();
        let seed_hex = hex::encode(keypair.signing_key.to_bytes());
        tokio::fs::write(path, format!("{seed_hex}\n"))
            .await
            .with_context(|| format!("Failed to write oracle key file {}", path.display()))?;
        Ok(keypair)
    }

    /// Base58 form of the derived public identity.
    #[must_use]
    pub fn public_key_base58(&self) -> String {
        bs58::encode(self.signing_key.verifying_key().to_bytes()).into_string()
    }

    /// Raw bytes of the derived public identity.
    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign exact payload bytes, returning the detached 64-byte signature.
    #[must_use]
    pub fn sign(&self, payload_bytes: &[u8]) -> [u8; 64] {
        self.signing_key.sign(payload_bytes).to_bytes()
    }
}

/// Verify a detached signature against a public key and exact message bytes.
///
/// Pure utility; ledger state is never consulted.
#[must_use]
pub fn verify_detached(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let keypair = OracleKeypair::from_seed(&[3_u8; SEED_SIZE]);
        let message = b"exact bytes";
        let signature = keypair.sign(message);
        assert!(verify_detached(
            &keypair.public_key_bytes(),
            message,
            &signature
        ));
        assert!(!verify_detached(
            &keypair.public_key_bytes(),
            b"other bytes",
            &signature
        ));
    }

    #[test]
    fn single_bit_flips_break_verification() {
        let keypair = OracleKeypair::from_seed(&[3_u8; SEED_SIZE]);
        let message = [0x5a_u8; 100];
        let signature = keypair.sign(&message);

        for byte_index in 0..message.len() {
            let mut tampered = message;
            if let Some(byte) = tampered.get_mut(byte_index) {
                *byte ^= 0x01;
            }
            assert!(
                !verify_detached(&keypair.public_key_bytes(), &tampered, &signature),
                "payload bit flip at byte {byte_index} must fail verification"
            );
        }

        for byte_index in 0..signature.len() {
            let mut tampered = signature;
            if let Some(byte) = tampered.get_mut(byte_index) {
                *byte ^= 0x01;
            }
            assert!(
                !verify_detached(&keypair.public_key_bytes(), &message, &tampered),
                "signature bit flip at byte {byte_index} must fail verification"
            );
        }
    }

    #[test]
    fn from_hex_rejects_bad_seeds() {
        assert!(OracleKeypair::from_hex("zz").is_err());
        assert!(OracleKeypair::from_hex(&"ab".repeat(16)).is_err());
        assert!(OracleKeypair::from_hex(&"ab".repeat(32)).is_ok());
    }

    #[tokio::test]
    async fn key_file_round_trip_and_no_overwrite() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("oracle-key.txt");

        let generated = OracleKeypair::generate_key_file(&path).await.expect("generate");
        let loaded = OracleKeypair::read_key_file(&path).await.expect("load");
        assert_eq!(generated.public_key_bytes(), loaded.public_key_bytes());

        let err = OracleKeypair::generate_key_file(&path)
            .await
            .expect_err("existing key must not be overwritten");
        assert!(err.to_string().contains("Refusing to overwrite"));
    }
}
