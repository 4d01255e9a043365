//! Per-root vote tally.
//!
//! One [`Votes`] exists per disputed root. It maps each representative to
//! the block it currently backs, seeded with the node's own tentative
//! choice under a sentinel account. Callers serialize calls to
//! [`Votes::vote`] for the same root.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use bdm_01_block_model::Block;
use shared_types::{Account, BlockHash};
use tracing::debug;

use super::vote::Vote;

/// Effect of a vote on a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TallyResult {
    /// First vote seen from this representative.
    Vote,
    /// The representative switched to a different block.
    Changed,
    /// The representative repeated its current choice.
    Confirm,
}

#[derive(Debug, Clone)]
pub struct Votes {
    id: BlockHash,
    rep_votes: HashMap<Account, Arc<Block>>,
}

impl Votes {
    /// Start a tally for the root of `block`, recording `block` as the
    /// local choice under `not_an_account`.
    pub fn new(block: Arc<Block>, not_an_account: Account) -> Self {
        let id = block.root();
        let mut rep_votes = HashMap::new();
        rep_votes.insert(not_an_account, block);
        Self { id, rep_votes }
    }

    /// The disputed root.
    pub fn id(&self) -> BlockHash {
        self.id
    }

    pub fn rep_votes(&self) -> &HashMap<Account, Arc<Block>> {
        &self.rep_votes
    }

    /// Block currently backed by `account`.
    pub fn block_for(&self, account: &Account) -> Option<&Arc<Block>> {
        self.rep_votes.get(account)
    }

    /// Record `vote`. Sequence numbers are not checked here.
    pub fn vote(&mut self, vote: &Vote) -> TallyResult {
        let result = match self.rep_votes.entry(vote.account()) {
            Entry::Vacant(entry) => {
                entry.insert(vote.block().clone());
                TallyResult::Vote
            }
            Entry::Occupied(mut entry) if **entry.get() != **vote.block() => {
                entry.insert(vote.block().clone());
                TallyResult::Changed
            }
            Entry::Occupied(_) => TallyResult::Confirm,
        };
        debug!(
            root = %self.id,
            account = %vote.account(),
            block = %vote.block().hash(),
            ?result,
            "Tallied vote"
        );
        result
    }

    /// True when every recorded choice, the local one included, is the
    /// same block.
    pub fn uncontested(&self) -> bool {
        let mut blocks = self.rep_votes.values();
        match blocks.next() {
            Some(first) => blocks.all(|block| **block == **first),
            None => true,
        }
    }
}
