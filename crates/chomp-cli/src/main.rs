//! Chomp CLI application.

mod cli;

use chomp_sdk::commands::ClaimRunArgs;
use clap::Parser as _;
use cli::{Cli, ClaimCommands, Commands, KeyCommands, ProgressCommands, VerifyCommands};

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
        Commands::Key { command } => match command {
            KeyCommands::Generate { output } => {
                chomp_sdk::identity::generate_seed_file(&output)
                    .await
                    .map(|user| {
                        tracing::info!(file = ?output, user = %user, "identity seed written");
                    })
            }
        },
        Commands::Claim { command } => match command {
            ClaimCommands::Run { args } => {
                chomp_sdk::commands::claim_run(ClaimRunArgs {
                    proof_file: args.proof,
                    seed_file: args.seed,
                    oracle_url: args.oracle_url,
                    oracle_pubkey: args.oracle_pubkey,
                    ledger_path: args.ledger,
                    day: args.day,
                    dev: args.dev,
                    attestation_output_file: args.attestation_out,
                    progress_output_file: args.progress_out,
                })
                .await
            }
            ClaimCommands::Attest { args } => {
                chomp_sdk::commands::attest_claim(
                    args.proof,
                    args.seed,
                    args.oracle_url,
                    args.oracle_pubkey,
                    args.day,
                    args.attestation_out,
                )
                .await
            }
            ClaimCommands::Submit { args } => {
                chomp_sdk::commands::submit_attestation(
                    args.attestation_in,
                    args.seed,
                    args.ledger,
                    args.oracle_pubkey,
                    args.dev,
                    args.progress_out,
                )
                .await
            }
        },
        Commands::Verify { command } => match command {
            VerifyCommands::Signature { attestation_in } => {
                chomp_sdk::commands::verify_attestation_file(attestation_in).await
            }
        },
        Commands::Progress { command } => match command {
            ProgressCommands::Init {
                user,
                ledger,
                oracle_pubkey,
            } => chomp_sdk::commands::init_progress(ledger, oracle_pubkey, user).await,
            ProgressCommands::Show {
                user,
                ledger,
                oracle_pubkey,
                progress_out,
            } => {
                chomp_sdk::commands::show_progress(ledger, oracle_pubkey, user, progress_out).await
            }
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
