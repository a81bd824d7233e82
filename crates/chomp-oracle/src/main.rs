//! Oracle service binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser as _;
use tracing::info;

use chomp_oracle::http::{AppState, serve};
use chomp_oracle::keys::OracleKeypair;

mod cli;

use crate::cli::{Cli, Commands};

async fn run_serve(
    listen: SocketAddr,
    key_file: PathBuf,
    max_expiry_window: i64,
) -> eyre::Result<()> {
    let keypair = OracleKeypair::read_key_file(&key_file).await?;
    info!(
        oracle_pubkey = %keypair.public_key_base58(),
        max_expiry_window,
        "signing key loaded"
    );
    serve(listen, AppState::new(keypair, max_expiry_window)).await
}

async fn run_generate_key(output: PathBuf) -> eyre::Result<()> {
    let keypair = OracleKeypair::generate_key_file(&output).await?;
    info!(
        file = ?output,
        oracle_pubkey = %keypair.public_key_base58(),
        "signing seed written"
    );
    Ok(())
}

/// Generates and prints the JSON schema for the `OracleConfig` struct.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
fn oracle_config_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(chomp_core::schema::oracle::OracleConfig);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("Oracle Configuration JSON Schema:\n{schema_str}");
    Ok(())
}

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Serve {
            listen,
            key_file,
            max_expiry_window,
        } => run_serve(listen, key_file, max_expiry_window).await,
        Commands::GenerateKey { output } => run_generate_key(output).await,
        Commands::ConfigSchema => oracle_config_schema(),
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
