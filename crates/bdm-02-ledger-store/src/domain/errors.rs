//! # Domain Errors
//!
//! Error types for the ledger store.

use bdm_01_block_model::DeserializationError;
use shared_types::StreamError;
use std::fmt;
use thiserror::Error;

/// A packed record could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid {record} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Truncated record: {0}")]
    Truncated(#[from] StreamError),
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    IOError { message: String },
    /// Data corruption in the store.
    CorruptionError { message: String },
}

impl fmt::Display for KVStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KVStoreError::IOError { message } => write!(f, "KV store I/O error: {}", message),
            KVStoreError::CorruptionError { message } => {
                write!(f, "KV store corruption: {}", message)
            }
        }
    }
}

impl std::error::Error for KVStoreError {}

/// Errors surfaced by [`crate::LedgerStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] KVStoreError),

    /// A stored value failed to decode as the record its table holds.
    #[error("Corrupt {table} entry: {source}")]
    Corrupt {
        table: &'static str,
        source: RecordError,
    },

    #[error("Corrupt stored block: {0}")]
    Block(#[from] DeserializationError),
}
