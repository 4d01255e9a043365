//! # Chain Walk (bdm-04)
//!
//! Legacy blocks record neither the amount they move nor (for receive,
//! open and change) the balance after them. This crate reconstructs both,
//! along with the representative in effect, by walking backward through
//! the store.
//!
//! | Query | Walker | Missing block |
//! |-------|--------|---------------|
//! | amount moved by a block | [`AmountVisitor`] | `BrokenChain` |
//! | account balance at a block | [`BalanceVisitor`] | `CorruptLedger` |
//! | block setting the representative | [`RepresentativeVisitor`] | `CorruptLedger` |
//!
//! The amount and balance walks call each other: a send's amount needs the
//! balance before it, and a receive's balance needs the amount it took in.
//! Both run as frames on one heap stack rather than as nested calls.
//!
//! [`Ledger`] bundles the walkers with the store and network constants.

pub mod errors;
pub mod ledger;
pub mod test_utils;
pub mod visitors;

pub use errors::WalkError;
pub use ledger::Ledger;
pub use visitors::{AmountVisitor, BalanceVisitor, RepresentativeVisitor};
