//! Port definitions.

pub mod ledger_store;
pub mod outbound;

pub use ledger_store::*;
pub use outbound::*;
