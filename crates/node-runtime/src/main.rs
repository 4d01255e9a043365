//! # Badem Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `BDM_*` environment)
//! 2. Install the log subscriber
//! 3. Open the ledger store for the configured network
//! 4. Create genesis (if the store is empty)
//! 5. Report the ledger summary

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use node_runtime::{LedgerContainer, NodeConfig};

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter '{}'", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Invalid configuration")?;
    init_logging(&config.log_filter)?;

    info!("===========================================");
    info!("  Badem Ledger Node v{}", env!("CARGO_PKG_VERSION"));
    info!("  Network: {}", config.network);
    info!("  Store:   {} ({})", config.storage.backend, config.storage.data_dir.display());
    info!("===========================================");

    let container = LedgerContainer::open(config)?;
    let summary = container.summary()?;
    info!(status = ?container.genesis_status, "Ledger ready: {}", summary);

    Ok(())
}
