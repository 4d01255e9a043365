use std::time::{SystemTime, UNIX_EPOCH};

use crate::ports::outbound::TimeSource;

/// The host clock. A clock set before 1970 reads as zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}
