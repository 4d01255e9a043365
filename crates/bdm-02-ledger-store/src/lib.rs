//! # Ledger Store (bdm-02)
//!
//! Per-account and per-block metadata records and the transactional store
//! they are persisted in.
//!
//! ## Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | blocks | block hash | type-prefixed block |
//! | block_info | legacy block hash | `BlockInfo` |
//! | accounts | account | `AccountInfo` |
//! | pending | `PendingKey` | `PendingInfo` |
//! | representation | representative account | delegated weight |
//! | checksum | `(prefix, mask)` | hash |
//! | frontiers | head block hash | account |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, key layout, errors
//! - `ports/` - `LedgerStore` (inbound) and `KeyValueStore`, `TimeSource` (outbound)
//! - `adapters/` - In-memory and file-backed engines, system clock
//! - `service.rs` - `KvLedgerStore`, the port implemented over any engine
//!
//! ## Usage
//!
//! ```ignore
//! let store = KvLedgerStore::new_in_memory();
//! let mut txn = store.tx_begin_write();
//! store.account_put(&mut txn, &account, &info);
//! store.commit(txn)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, SystemTimeSource};
pub use domain::*;
pub use ports::*;
pub use service::KvLedgerStore;
pub use test_utils::FixedTimeSource;
