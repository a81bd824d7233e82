//! Claim pipeline subcommands.

use std::path::PathBuf;

use super::constants::{
    CHOMP_LEDGER_PATH, CHOMP_ORACLE_PUBKEY, CHOMP_ORACLE_URL, CHOMP_USER_SEED,
    DEFAULT_LEDGER_PATH, DEFAULT_ORACLE_URL,
};

/// Claim pipeline commands.
#[derive(Debug, clap::Subcommand)]
pub enum ClaimCommands {
    /// Run the full pipeline: bind, attest, submit.
    Run {
        /// Pipeline arguments.
        #[command(flatten)]
        args: ClaimRunCliArgs,
    },
    /// Bind a detection proof and request an oracle attestation.
    Attest {
        /// Attestation arguments.
        #[command(flatten)]
        args: ClaimAttestArgs,
    },
    /// Submit a stored attestation as one atomic claim.
    Submit {
        /// Submission arguments.
        #[command(flatten)]
        args: ClaimSubmitArgs,
    },
}

/// Arguments for `claim run`.
#[derive(Debug, clap::Args)]
pub struct ClaimRunCliArgs {
    /// Detection proof JSON file to bind.
    #[arg(long)]
    pub proof: PathBuf,
    /// Identity seed file.
    #[arg(long, env = CHOMP_USER_SEED)]
    pub seed: PathBuf,
    /// Oracle base URL.
    #[arg(long, env = CHOMP_ORACLE_URL, default_value = DEFAULT_ORACLE_URL)]
    pub oracle_url: String,
    /// Expected base58 oracle signer identity.
    #[arg(long, env = CHOMP_ORACLE_PUBKEY)]
    pub oracle_pubkey: String,
    /// Ledger store path.
    #[arg(long, env = CHOMP_LEDGER_PATH, default_value = DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,
    /// UTC day number to claim; defaults to today.
    #[arg(long)]
    pub day: Option<i64>,
    /// Use the development entry point (no day sequencing).
    #[arg(long)]
    pub dev: bool,
    /// Optional file to persist the received attestation.
    #[arg(long)]
    pub attestation_out: Option<PathBuf>,
    /// Optional file to persist the updated progress.
    #[arg(long)]
    pub progress_out: Option<PathBuf>,
}

/// Arguments for `claim attest`.
#[derive(Debug, clap::Args)]
pub struct ClaimAttestArgs {
    /// Detection proof JSON file to bind.
    #[arg(long)]
    pub proof: PathBuf,
    /// Identity seed file.
    #[arg(long, env = CHOMP_USER_SEED)]
    pub seed: PathBuf,
    /// Oracle base URL.
    #[arg(long, env = CHOMP_ORACLE_URL, default_value = DEFAULT_ORACLE_URL)]
    pub oracle_url: String,
    /// Expected base58 oracle signer identity.
    #[arg(long, env = CHOMP_ORACLE_PUBKEY)]
    pub oracle_pubkey: String,
    /// UTC day number to claim; defaults to today.
    #[arg(long)]
    pub day: Option<i64>,
    /// Where to write the attestation JSON.
    #[arg(long, default_value = "attestation.json")]
    pub attestation_out: PathBuf,
}

/// Arguments for `claim submit`.
#[derive(Debug, clap::Args)]
pub struct ClaimSubmitArgs {
    /// Attestation JSON file to submit.
    #[arg(long)]
    pub attestation_in: PathBuf,
    /// Identity seed file.
    #[arg(long, env = CHOMP_USER_SEED)]
    pub seed: PathBuf,
    /// Ledger store path.
    #[arg(long, env = CHOMP_LEDGER_PATH, default_value = DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,
    /// Expected base58 oracle signer identity.
    #[arg(long, env = CHOMP_ORACLE_PUBKEY)]
    pub oracle_pubkey: String,
    /// Use the development entry point (no day sequencing).
    #[arg(long)]
    pub dev: bool,
    /// Optional file to persist the updated progress.
    #[arg(long)]
    pub progress_out: Option<PathBuf>,
}
