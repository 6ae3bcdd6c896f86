//! Tessera CLI — Command-line interface for credential verification.
//!
//! Subcommands: verify, check.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Tessera — Credential verification and composite resolution.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about, long_about = None)]
struct Cli {
    /// Log level for diagnostics written to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify an identity through a running node.
    Verify(commands::verify::VerifyArgs),
    /// Verify an identity against a local dataset file.
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Verify(args) => commands::verify::run(args).await,
        Commands::Check(args) => commands::check::run(args),
    }
}
