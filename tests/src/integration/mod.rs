//! Multi-crate scenarios driven through [`crate::fixtures::Replay`].

pub mod chain_replay;
pub mod fork_voting;
