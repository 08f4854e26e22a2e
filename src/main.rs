//! Blocklist gate (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                BLOCKLIST GATE                │
//!   Client Request     │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   ───────────────────┼─▶│listener │───▶│  gate   │───▶│forwarder │──┼──▶ Upstream
//!                      │  └─────────┘    └────┬────┘    └──────────┘  │
//!   403 Forbidden      │                      │ contains?             │
//!   ◀──────────────────┼──────────────────────┤                       │
//!                      │                ┌─────┴─────┐                 │
//!                      │                │   store   │◀── swap ──┐     │
//!                      │                └───────────┘           │     │
//!                      │                                ┌───────┴───┐ │
//!   blocklist.txt ─────┼───────────────────────────────▶│ refresh   │ │
//!                      │                                │ loop      │ │
//!                      │                                └───────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use blocklist_gate::config::{load_config, ProxyConfig};
use blocklist_gate::lifecycle::startup;
use blocklist_gate::observability::logging;

#[derive(Parser)]
#[command(name = "blocklist-gate")]
#[command(about = "Reverse proxy gate that rejects denylisted client IPs", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("blocklist-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        blocklist = %config.blocklist.path.display(),
        refresh_interval_ms = config.blocklist.refresh_interval_ms,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
