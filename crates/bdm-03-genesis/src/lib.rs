//! # Genesis (bdm-03)
//!
//! Network variants and the genesis bootstrap.
//!
//! Each network (test, beta, live) embeds the JSON of its root `open` block.
//! [`NetworkParameters::new`] selects one, parses and verifies it, and
//! carries the resulting constants to the rest of the node; nothing here is
//! process-global.
//!
//! ## Usage
//!
//! ```ignore
//! let params = NetworkParameters::new(Network::Live)?;
//! let mut txn = store.tx_begin_write();
//! params.genesis().initialize(&store, &mut txn, &SystemTimeSource)?;
//! store.commit(txn)?;
//! ```

pub mod errors;
pub mod genesis;
pub mod network;

pub use errors::GenesisError;
pub use genesis::Genesis;
pub use network::{LedgerConstants, Network, NetworkParameters};
