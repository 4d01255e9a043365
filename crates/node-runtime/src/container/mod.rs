//! # Ledger Container
//!
//! Configuration plus the opened ledger, assembled once at startup.

pub mod config;
pub mod ledger;

pub use config::{ConfigError, NodeConfig, StorageConfig, StoreBackend};
pub use ledger::{LedgerContainer, LedgerSummary};
