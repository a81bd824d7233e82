//! CLI-independent shared helpers.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chomp_ledger::Ledger;
use eyre::{Context as _, ensure};

/// Seconds of validity requested for a fresh attestation.
///
/// Well inside the oracle's freshness window, and long enough to submit the
/// claim transaction.
pub const DEFAULT_EXPIRY_SLACK_SECS: i64 = 60;

/// Current unix time in seconds.
///
/// # Errors
/// Returns an error if the system clock reads before the unix epoch.
pub fn unix_now() -> eyre::Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?;
    i64::try_from(elapsed.as_secs()).context("System clock overflow")
}

/// Parse a base58 oracle public key into raw bytes.
///
/// # Errors
/// Returns an error if the string is not base58 or not 32 bytes.
pub fn parse_oracle_pubkey(oracle_pubkey: &str) -> eyre::Result<[u8; 32]> {
    let decoded = bs58::decode(oracle_pubkey)
        .into_vec()
        .context("Oracle public key is not valid base58")?;
    ensure!(
        decoded.len() == 32,
        "Oracle public key must decode to exactly 32 bytes, got {}",
        decoded.len()
    );
    decoded
        .try_into()
        .map_err(|_| eyre::eyre!("Oracle public key must decode to exactly 32 bytes"))
}

/// Open the ledger store trusting the given base58 oracle key.
///
/// # Errors
/// Returns an error if the key does not parse or the store cannot open.
pub fn open_ledger(ledger_path: &Path, oracle_pubkey: &str) -> eyre::Result<Ledger> {
    let key = parse_oracle_pubkey(oracle_pubkey)?;
    Ledger::open(ledger_path, &key)
        .with_context(|| format!("Failed to open ledger at {}", ledger_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_pubkey_parse() {
        let encoded = bs58::encode([9_u8; 32]).into_string();
        let decoded = parse_oracle_pubkey(&encoded).expect("well-formed key should parse");
        assert_eq!(decoded, [9_u8; 32]);

        assert!(parse_oracle_pubkey("0OIl").is_err());
        let short = bs58::encode([9_u8; 8]).into_string();
        assert!(parse_oracle_pubkey(&short).is_err());
    }

    #[test]
    fn unix_now_is_positive() {
        assert!(unix_now().expect("clock readable") > 0);
    }
}
