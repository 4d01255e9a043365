//! # Voting (bdm-05)
//!
//! Representatives settle forks by voting for one block per root.
//!
//! - [`Vote`]: a signed `(account, sequence, block)` claim, with its binary
//!   and JSON encodings.
//! - [`Votes`]: the latest choice of every representative for one root,
//!   reporting each incoming vote as [`TallyResult::Vote`],
//!   [`TallyResult::Changed`] or [`TallyResult::Confirm`].
//!
//! Weighting votes by delegated balance and deciding quorum happen above
//! this crate.

pub mod domain;

pub use domain::*;
