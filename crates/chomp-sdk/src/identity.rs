//! Wallet identity seed handling.
//!
//! The claimant identity is an ed25519 public key derived from a 32-byte
//! seed. The seed never signs anything in this protocol — transaction
//! authentication is the ledger abstraction's concern — but losing it means
//! losing the identity, so it gets the same handling as any signing seed.

use std::path::Path;

use chomp_core::base::UserId;
use ed25519_dalek::SigningKey;
use eyre::{Context as _, ensure};
use rand_core::{OsRng, RngCore as _};
use secrecy::{ExposeSecret as _, SecretBox};
use zeroize::Zeroize as _;

/// Size in bytes of a wallet identity seed.
pub const USER_SEED_SIZE: usize = 32;

/// Parse a hex-encoded seed into a 32-byte secret.
///
/// # Errors
/// Returns an error if the string is not hex or not exactly 32 bytes.
pub fn parse_seed_hex(seed_hex: &str) -> eyre::Result<SecretBox<[u8; USER_SEED_SIZE]>> {
    // Wrap in Zeroizing immediately so it's zeroized on drop even if we return early.
    let seed_bytes = zeroize::Zeroizing::new(hex::decode(seed_hex).context("Invalid hex seed")?);

    ensure!(
        seed_bytes.len() == USER_SEED_SIZE,
        "Seed must be exactly {USER_SEED_SIZE} bytes (64 hex characters), got {} bytes",
        seed_bytes.len()
    );

    let array: [u8; USER_SEED_SIZE] = seed_bytes[..]
        .try_into()
        .map_err(|_| eyre::eyre!("Seed must be exactly {USER_SEED_SIZE} bytes"))?;

    Ok(SecretBox::new(Box::new(array)))
}

/// Read a seed file containing hex and parse it into a 32-byte secret.
///
/// # Errors
/// Returns an error if the file cannot be read or the seed is invalid.
pub async fn read_seed_file(path: &Path) -> eyre::Result<SecretBox<[u8; USER_SEED_SIZE]>> {
    let seed_hex = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    parse_seed_hex(seed_hex.trim())
}

/// Derive the public claimant identity from a seed.
#[must_use]
pub fn user_id_from_seed(seed: &SecretBox<[u8; USER_SEED_SIZE]>) -> UserId {
    let signing_key = SigningKey::from_bytes(seed.expose_secret());
    UserId::new(signing_key.verifying_key().to_bytes())
}

/// Generate a fresh seed file and return the derived identity.
///
/// # Errors
/// Returns an error if a file already exists at `path` or the write fails.
pub async fn generate_seed_file(path: &Path) -> eyre::Result<UserId> {
    ensure!(
        !path.exists(),
        "Refusing to overwrite existing seed file {}",
        path.display()
    );
    let mut seed = [0_u8; USER_SEED_SIZE];
    OsRng.fill_bytes(&mut seed);
    let mut seed_hex = hex::encode(seed);
    let user = user_id_from_seed(&SecretBox::new(Box::new(seed)));
    seed.zeroize();
    let write_result = tokio::fs::write(path, format!("{seed_hex}\n")).await;
    seed_hex.zeroize();
    write_result.with_context(|| format!("Failed to write seed file {}", path.display()))?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn seed_parse_round_trip() {
        let seed = parse_seed_hex(&"ab".repeat(32)).expect("seed should parse");
        assert_eq!(seed.expose_secret(), &[0xab_u8; 32]);

        assert!(parse_seed_hex("zz").is_err());
        assert!(parse_seed_hex(&"ab".repeat(16)).is_err());
    }

    #[test]
    fn identity_derivation_is_deterministic() {
        let seed = parse_seed_hex(&"01".repeat(32)).expect("seed should parse");
        assert_eq!(user_id_from_seed(&seed), user_id_from_seed(&seed));
    }

    #[tokio::test]
    async fn seed_file_round_trip_and_no_overwrite() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("user-seed.txt");

        let generated = generate_seed_file(&path).await.expect("generate seed");
        let loaded = read_seed_file(&path).await.expect("read seed");
        assert_eq!(generated, user_id_from_seed(&loaded));

        assert!(generate_seed_file(&path).await.is_err());
    }
}
