//! Walkers that reconstruct values the legacy blocks do not carry.
//!
//! The representative walk is a plain loop. The amount and balance walks
//! call each other and share one explicit frame stack, so no history,
//! however interleaved, grows the call stack.

pub mod amount;
pub mod balance;
pub mod representative;
mod walk;

pub use amount::AmountVisitor;
pub use balance::BalanceVisitor;
pub use representative::RepresentativeVisitor;

use shared_types::BlockHash;

/// `None` for the zero hash, which terminates every walk.
pub(crate) fn cursor(hash: BlockHash) -> Option<BlockHash> {
    (!hash.is_zero()).then_some(hash)
}
