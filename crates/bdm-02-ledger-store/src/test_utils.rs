//! Test fixtures for code built on the ledger store.

use crate::ports::TimeSource;

/// Time source frozen at a given unix timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub u64);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> u64 {
        self.0
    }
}
