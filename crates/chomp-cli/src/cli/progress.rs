//! Progress account subcommands.

use std::path::PathBuf;

use chomp_core::base::UserId;

use super::constants::{CHOMP_LEDGER_PATH, CHOMP_ORACLE_PUBKEY, DEFAULT_LEDGER_PATH};
use super::parse_user_id;

/// Progress account commands.
#[derive(Debug, clap::Subcommand)]
pub enum ProgressCommands {
    /// Idempotently create a progress account.
    Init {
        /// Base58 claimant identity.
        #[arg(long, value_parser = parse_user_id)]
        user: UserId,
        /// Ledger store path.
        #[arg(long, env = CHOMP_LEDGER_PATH, default_value = DEFAULT_LEDGER_PATH)]
        ledger: PathBuf,
        /// Expected base58 oracle signer identity.
        #[arg(long, env = CHOMP_ORACLE_PUBKEY)]
        oracle_pubkey: String,
    },
    /// Read and report a progress account.
    Show {
        /// Base58 claimant identity.
        #[arg(long, value_parser = parse_user_id)]
        user: UserId,
        /// Ledger store path.
        #[arg(long, env = CHOMP_LEDGER_PATH, default_value = DEFAULT_LEDGER_PATH)]
        ledger: PathBuf,
        /// Expected base58 oracle signer identity.
        #[arg(long, env = CHOMP_ORACLE_PUBKEY)]
        oracle_pubkey: String,
        /// Optional file to persist the progress record.
        #[arg(long)]
        progress_out: Option<PathBuf>,
    },
}
