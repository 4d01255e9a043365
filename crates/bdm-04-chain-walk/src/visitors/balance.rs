use bdm_01_block_model::Block;
use bdm_02_ledger_store::{LedgerStore, Transaction};
use bdm_03_genesis::LedgerConstants;
use shared_types::{Amount, BlockHash};
use tracing::debug;

use super::amount::AmountFrame;
use super::cursor;
use super::walk::{run, Frame, Resume, WalkContext};
use crate::errors::WalkError;

/// Computes an account's balance as of a given block.
///
/// State and send blocks carry their balance. Receive and change blocks use
/// the cached `block_info` balance when present; otherwise the walk adds the
/// amount received and continues with the predecessor. An open block's
/// balance is the amount of its source.
pub struct BalanceVisitor<'a> {
    ctx: WalkContext<'a>,
}

impl<'a> BalanceVisitor<'a> {
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
        let balance = run(&self.ctx, Frame::Balance(BalanceFrame::new(*hash)))?;
        debug!(%hash, %balance, "Computed block balance");
        Ok(balance)
    }
}

/// One balance walk. A receive without cached info sets both cursors; the
/// amount is always resolved first, as a child walk.
pub(crate) struct BalanceFrame {
    balance: Amount,
    amount: Option<BlockHash>,
    next: Option<BlockHash>,
}

impl BalanceFrame {
    pub(crate) fn new(hash: BlockHash) -> Self {
        Self {
            balance: Amount::ZERO,
            amount: None,
            next: cursor(hash),
        }
    }

    pub(crate) fn resume(
        &mut self,
        ctx: &WalkContext<'_>,
        received: Option<Amount>,
    ) -> Result<Resume, WalkError> {
        if let Some(amount) = received {
            self.balance = self.balance.wrapping_add(amount);
        }

        loop {
            if let Some(source) = self.amount.take() {
                return Ok(Resume::Call(Frame::Amount(AmountFrame::new(source))));
            }
            let Some(current) = self.next.take() else {
                break;
            };

            let block = ctx
                .store
                .block_get(ctx.txn, &current)?
                .ok_or(WalkError::CorruptLedger { hash: current })?;

            match block {
                Block::Send(send) => {
                    self.balance = self.balance.wrapping_add(send.balance());
                }
                Block::State(state) => {
                    self.balance = state.balance();
                }
                Block::Receive(receive) => match ctx.store.block_info_get(ctx.txn, &current)? {
                    Some(info) => self.balance = self.balance.wrapping_add(info.balance),
                    None => {
                        self.amount = cursor(receive.source());
                        self.next = cursor(receive.previous());
                    }
                },
                Block::Open(open) => {
                    self.amount = cursor(open.source());
                }
                Block::Change(change) => match ctx.store.block_info_get(ctx.txn, &current)? {
                    Some(info) => self.balance = self.balance.wrapping_add(info.balance),
                    None => self.next = cursor(change.previous()),
                },
            }
        }

        Ok(Resume::Return(self.balance))
    }
}
