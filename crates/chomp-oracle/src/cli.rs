//! Command-line interface for the oracle service binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use chomp_oracle::attest::MAX_EXPIRY_WINDOW_SECS;
use clap::Parser;

/// Env var holding the listen address.
pub const CHOMP_ORACLE_LISTEN: &str = "CHOMP_ORACLE_LISTEN";
/// Env var holding the signing key file path.
pub const CHOMP_ORACLE_KEY_FILE: &str = "CHOMP_ORACLE_KEY_FILE";
/// Env var holding the freshness window override.
pub const CHOMP_ORACLE_MAX_WINDOW: &str = "CHOMP_ORACLE_MAX_WINDOW";

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8787";

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "chomp-oracle")]
#[command(about = "Attestation oracle for the chomp protocol")]
pub struct Cli {
    /// Oracle top-level command.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Run the signing service.
    Serve {
        /// Socket address to listen on.
        #[arg(long, env = CHOMP_ORACLE_LISTEN, default_value = DEFAULT_LISTEN)]
        listen: SocketAddr,
        /// Path to the hex-encoded 32-byte signing seed file.
        #[arg(long, env = CHOMP_ORACLE_KEY_FILE)]
        key_file: PathBuf,
        /// Upper bound in seconds on `expiresAt - now` accepted by sign.
        #[arg(long, env = CHOMP_ORACLE_MAX_WINDOW, default_value_t = MAX_EXPIRY_WINDOW_SECS)]
        max_expiry_window: i64,
    },
    /// Generate a fresh signing seed file.
    GenerateKey {
        /// Where to write the hex seed; refuses to overwrite.
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the JSON schema of the oracle deployment configuration.
    ConfigSchema,
}
