//! # Outbound Ports
//!
//! What the ledger store needs from its host: a byte-oriented key-value
//! engine and a clock for `AccountInfo::modified`.

use crate::domain::errors::KVStoreError;

/// `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Ordered key-value engine underneath [`crate::KvLedgerStore`].
///
/// Implemented here by `InMemoryKVStore` and `FileBackedKVStore`, and by
/// `RocksDbStore` in the node runtime.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply every operation, in order, or none of them.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Entries whose key starts with `prefix`.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// One staged write of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Wall clock, in seconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> u64;
}
