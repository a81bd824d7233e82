//! Command-line interface for the `chomp` CLI application.

mod claim;
pub mod constants;
mod key;
mod progress;
mod verify;

use chomp_core::base::UserId;
use clap::Parser;
use eyre::Result;

pub use self::claim::ClaimCommands;
pub use self::key::KeyCommands;
pub use self::progress::ProgressCommands;
pub use self::verify::VerifyCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "chomp")]
#[command(about = "Daily brushing attestation tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Identity seed utilities.
    Key {
        /// Key subcommands.
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Claim pipeline commands.
    Claim {
        /// Claim subcommands.
        #[command(subcommand)]
        command: ClaimCommands,
    },
    /// Verification commands.
    Verify {
        /// Verify subcommands.
        #[command(subcommand)]
        command: VerifyCommands,
    },
    /// Progress account commands.
    Progress {
        /// Progress subcommands.
        #[command(subcommand)]
        command: ProgressCommands,
    },
}

/// Parse a base58 claimant identity argument.
pub fn parse_user_id(s: &str) -> Result<UserId> {
    UserId::from_base58(s).map_err(|e| eyre::eyre!("Invalid user identity: {e}"))
}
