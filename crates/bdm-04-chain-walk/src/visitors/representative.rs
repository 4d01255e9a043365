use bdm_01_block_model::Block;
use bdm_02_ledger_store::{LedgerStore, Transaction};
use shared_types::BlockHash;
use tracing::debug;

use crate::errors::WalkError;

/// Finds the block that set the representative in effect at a given block:
/// the nearest open, change or state block at or before it.
pub struct RepresentativeVisitor<'a> {
    txn: &'a dyn Transaction,
    store: &'a dyn LedgerStore,
}

impl<'a> RepresentativeVisitor<'a> {
    pub fn new(txn: &'a dyn Transaction, store: &'a dyn LedgerStore) -> Self {
        Self { txn, store }
    }

    pub fn compute(&self, hash: &BlockHash) -> Result<BlockHash, WalkError> {
        let mut current = *hash;
        loop {
            let block = self
                .store
                .block_get(self.txn, &current)?
                .ok_or(WalkError::CorruptLedger { hash: current })?;

            match block {
                Block::Send(send) => current = send.previous(),
                Block::Receive(receive) => current = receive.previous(),
                Block::Open(_) | Block::Change(_) | Block::State(_) => {
                    debug!(%hash, rep_block = %current, "Found representative block");
                    return Ok(current);
                }
            }
        }
    }
}
