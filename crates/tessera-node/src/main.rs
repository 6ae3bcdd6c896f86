//! Tessera Node — entry point.
//!
//! Starts the verification API with configuration from a TOML file or defaults.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tessera_node::{start_api_server, NodeState, TesseraConfig};

/// Tessera Verification Node
#[derive(Parser, Debug)]
#[command(name = "tessera-node", version, about = "Tessera Verification Node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "tessera.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the dataset file.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --init flag
    if args.init {
        let config = TesseraConfig::default();
        config.save(&args.config)?;
        println!("wrote default config to {}", args.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = TesseraConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(api_port) = args.api_port {
        config.api.port = api_port;
    }
    if let Some(dataset) = args.dataset {
        config.data.dataset = Some(dataset);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging.level, &config.logging.format);

    tracing::info!("Tessera Node v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(NodeState::from_config(&config)?);
    let listen_addr = config.api_socket_addr()?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = start_api_server(listen_addr, state) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "API server error");
                return Err(e);
            }
        }
        _ = shutdown => {
            tracing::info!("initiating graceful shutdown");
        }
    }

    tracing::info!("Tessera node exited cleanly");
    Ok(())
}
