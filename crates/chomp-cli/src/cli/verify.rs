//! Verification subcommands.

use std::path::PathBuf;

/// Verification commands.
#[derive(Debug, clap::Subcommand)]
pub enum VerifyCommands {
    /// Verify a stored attestation's signature offline.
    Signature {
        /// Attestation JSON file to check.
        #[arg(long)]
        attestation_in: PathBuf,
    },
}
