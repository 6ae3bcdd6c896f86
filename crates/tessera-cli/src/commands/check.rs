//! `tessera check` — Verify an identity against a local dataset file.

use clap::Args;
use std::path::PathBuf;

use tessera_core::{AddressFormat, EngineConfig};
use tessera_verify::{Dataset, MemoryStore, Sources, Verifier};

use super::report::{self, ReportView};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Identity (wallet address) to verify.
    pub address: String,

    /// JSON dataset with credentials, issuers, and rules.
    #[arg(short, long)]
    pub dataset: PathBuf,

    /// Evaluate expiry as of this Unix timestamp instead of the current time.
    #[arg(long)]
    pub now: Option<i64>,

    /// Expiring-soon window in seconds.
    #[arg(long)]
    pub window: Option<i64>,

    /// Accept any non-blank identity instead of a hex address.
    #[arg(long)]
    pub opaque: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.dataset)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", args.dataset.display(), e))?;
    let store = MemoryStore::from_dataset(Dataset::from_json(&contents)?)?;

    let mut config = EngineConfig::default();
    if let Some(window) = args.window {
        config.expiring_soon_window_secs = window;
    }
    if args.opaque {
        config.address_format = AddressFormat::Opaque;
    }

    let verifier = Verifier::new(config);
    let now = args.now.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let sources = Sources::from_backend(&store);

    let json = verifier.run(&args.address, &sources, now, |report| {
        serde_json::to_value(&report)
    })??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        let view: ReportView = serde_json::from_value(json)?;
        report::print(&view);
    }

    Ok(())
}
