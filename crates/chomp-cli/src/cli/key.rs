//! Identity seed subcommands.

use std::path::PathBuf;

/// Identity seed commands.
#[derive(Debug, clap::Subcommand)]
pub enum KeyCommands {
    /// Generate a fresh identity seed file.
    Generate {
        /// Where to write the hex seed; refuses to overwrite.
        #[arg(long)]
        output: PathBuf,
    },
}
