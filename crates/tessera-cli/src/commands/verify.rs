//! `tessera verify` — Verify an identity through a running node.

use clap::Args;

use super::report::{self, Envelope};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Identity (wallet address) to verify.
    pub address: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:9101")]
    pub endpoint: String,

    /// Print the raw JSON envelope instead of a table.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/verify/{}", args.endpoint, args.address);
    let resp = match reqwest::get(&url).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Is the node running? Start it with: tessera-node");
            anyhow::bail!("could not reach node at {}: {}", args.endpoint, e);
        }
    };

    let status = resp.status();
    let body: serde_json::Value = resp.json().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let envelope: Envelope = serde_json::from_value(body)?;
    match (envelope.success, envelope.data) {
        (true, Some(data)) => report::print(&data),
        _ => {
            let error = envelope.error.unwrap_or_else(|| "unknown error".into());
            anyhow::bail!("verification failed (HTTP {}): {}", status, error);
        }
    }

    Ok(())
}
