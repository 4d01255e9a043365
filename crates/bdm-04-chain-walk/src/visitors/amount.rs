use bdm_01_block_model::Block;
use bdm_02_ledger_store::{LedgerStore, Transaction};
use bdm_03_genesis::LedgerConstants;
use shared_types::{Amount, BlockHash};
use tracing::debug;

use super::balance::BalanceFrame;
use super::cursor;
use super::walk::{run, Frame, Resume, WalkContext};
use crate::errors::WalkError;

enum Step {
    /// Follow the block whose transferred amount is wanted.
    Amount(BlockHash),
    /// Difference the amount found so far against this block's balance.
    Balance(BlockHash),
}

/// Computes how much value a block moved.
///
/// - send/state: its balance against the balance before it
/// - receive: the amount of the send it consumed
/// - open: the amount of its source, or the full supply when opened straight
///   from the genesis account
/// - change: zero
pub struct AmountVisitor<'a> {
    ctx: WalkContext<'a>,
}

impl<'a> AmountVisitor<'a> {
    pub fn new(
        txn: &'a dyn Transaction,
        store: &'a dyn LedgerStore,
        constants: &'a LedgerConstants,
    ) -> Self {
        Self {
            ctx: WalkContext {
                txn,
                store,
                constants,
            },
        }
    }

    pub fn compute(&self, hash: &BlockHash) -> Result<Amount, WalkError> {
        let amount = run(&self.ctx, Frame::Amount(AmountFrame::new(*hash)))?;
        debug!(%hash, %amount, "Computed block amount");
        Ok(amount)
    }
}

/// One amount walk, suspended while the balance before a send or state
/// block is resolved.
pub(crate) struct AmountFrame {
    /// Hash the walk started from; a missing block at this hash may be the
    /// genesis sentinel.
    origin: BlockHash,
    amount: Amount,
    next: Option<Step>,
}

impl AmountFrame {
    pub(crate) fn new(hash: BlockHash) -> Self {
        Self {
            origin: hash,
            amount: Amount::ZERO,
            next: cursor(hash).map(Step::Amount),
        }
    }

    pub(crate) fn resume(
        &mut self,
        ctx: &WalkContext<'_>,
        prior_balance: Option<Amount>,
    ) -> Result<Resume, WalkError> {
        if let Some(prior) = prior_balance {
            self.amount = self.amount.abs_diff(prior);
        }

        while let Some(step) = self.next.take() {
            let current = match step {
                Step::Amount(current) => current,
                Step::Balance(previous) => {
                    return Ok(Resume::Call(Frame::Balance(BalanceFrame::new(previous))));
                }
            };

            match ctx.store.block_get(ctx.txn, &current)? {
                Some(Block::Send(send)) => {
                    self.amount = send.balance();
                    self.next = cursor(send.previous()).map(Step::Balance);
                }
                Some(Block::State(state)) => {
                    self.amount = state.balance();
                    self.next = cursor(state.previous()).map(Step::Balance);
                }
                Some(Block::Receive(receive)) => {
                    self.next = cursor(receive.source()).map(Step::Amount);
                }
                Some(Block::Open(open)) => {
                    if open.source().as_bytes() == ctx.constants.genesis_account.as_bytes() {
                        self.amount = ctx.constants.genesis_amount;
                    } else {
                        self.next = cursor(open.source()).map(Step::Amount);
                    }
                }
                Some(Block::Change(_)) => {
                    self.amount = Amount::ZERO;
                }
                // The genesis open names its own account as source; that
                // hash is never stored and stands for the minted supply.
                None if self.origin.as_bytes() == ctx.constants.genesis_account.as_bytes() => {
                    self.amount = ctx.constants.genesis_amount;
                }
                None => return Err(WalkError::BrokenChain { hash: current }),
            }
        }

        Ok(Resume::Return(self.amount))
    }
}
