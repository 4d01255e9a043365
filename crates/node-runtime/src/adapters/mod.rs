//! # Adapters
//!
//! Concrete implementations of the ledger store's outbound ports.

pub mod storage;

pub use storage::*;
