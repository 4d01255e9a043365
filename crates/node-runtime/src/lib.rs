//! # Node Runtime Library
//!
//! Startup plumbing for the ledger node, exposed as a library so the
//! binary stays thin and the wiring is testable.
//!
//! - `container/` - Configuration and the opened ledger
//! - `genesis/` - First-start bootstrap and network check
//! - `adapters/` - Key-value engines (RocksDB behind the `rocksdb` feature)

pub mod adapters;
pub mod container;
pub mod genesis;

pub use container::{ConfigError, LedgerContainer, LedgerSummary, NodeConfig, StoreBackend};
pub use genesis::{ensure_genesis, BootstrapError, GenesisStatus};
