//! Storage Adapters
//!
//! Implementations of the outbound ports. Both key-value engines keep the
//! whole table in a `BTreeMap`; they differ only in whether it is persisted.

use std::collections::BTreeMap;

use crate::ports::outbound::{BatchOperation, ScanResult};

mod file;
mod memory;
mod time;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
pub use time::SystemTimeSource;

type Table = BTreeMap<Vec<u8>, Vec<u8>>;

fn apply_batch(table: &mut Table, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                table.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                table.remove(&key);
            }
        }
    }
}

fn scan_prefix(table: &Table, prefix: &[u8]) -> ScanResult {
    table
        .range(prefix.to_vec()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
