//! # Storage Adapters
//!
//! Key-value engines the ledger store can run on.
//!
//! - `InMemoryKVStore`, `FileBackedKVStore`: always available
//! - `RocksDbStore`: enable the `rocksdb` feature
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

pub use bdm_02_ledger_store::{FileBackedKVStore, InMemoryKVStore, SystemTimeSource};
