//! Environment variable names and defaults for CLI arguments.

/// Env var holding the oracle base URL.
pub const CHOMP_ORACLE_URL: &str = "CHOMP_ORACLE_URL";
/// Env var holding the expected base58 oracle signer identity.
pub const CHOMP_ORACLE_PUBKEY: &str = "CHOMP_ORACLE_PUBKEY";
/// Env var holding the ledger store path.
pub const CHOMP_LEDGER_PATH: &str = "CHOMP_LEDGER_PATH";
/// Env var holding the identity seed file path.
pub const CHOMP_USER_SEED: &str = "CHOMP_USER_SEED";

/// Default oracle base URL, matching the oracle binary's default listener.
pub const DEFAULT_ORACLE_URL: &str = "http://127.0.0.1:8787";
/// Default ledger store path.
pub const DEFAULT_LEDGER_PATH: &str = "chomp-ledger";
