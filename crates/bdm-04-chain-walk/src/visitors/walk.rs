//! Shared driver for the amount and balance walks.
//!
//! The two walks depend on each other: a send's amount needs the balance
//! before it, and a receive's balance needs the amount it took in. Each
//! walk is a [`Frame`] that either finishes with a value or suspends on a
//! child walk. [`run`] keeps suspended frames on a heap stack, so a history
//! of any length is walked at constant call depth.

use bdm_02_ledger_store::{LedgerStore, Transaction};
use bdm_03_genesis::LedgerConstants;
use shared_types::Amount;

use super::amount::AmountFrame;
use super::balance::BalanceFrame;
use crate::errors::WalkError;

/// Store handles every frame reads through.
#[derive(Clone, Copy)]
pub(crate) struct WalkContext<'a> {
    pub txn: &'a dyn Transaction,
    pub store: &'a dyn LedgerStore,
    pub constants: &'a LedgerConstants,
}

pub(crate) enum Frame {
    Amount(AmountFrame),
    Balance(BalanceFrame),
}

/// Outcome of resuming a frame.
pub(crate) enum Resume {
    /// Suspend until the child walk returns its value.
    Call(Frame),
    Return(Amount),
}

impl Frame {
    fn resume(&mut self, ctx: &WalkContext<'_>, child: Option<Amount>) -> Result<Resume, WalkError> {
        match self {
            Frame::Amount(frame) => frame.resume(ctx, child),
            Frame::Balance(frame) => frame.resume(ctx, child),
        }
    }
}

/// Run `root` and every walk it calls to completion.
pub(crate) fn run(ctx: &WalkContext<'_>, root: Frame) -> Result<Amount, WalkError> {
    let mut stack = vec![root];
    let mut value = None;

    while let Some(frame) = stack.last_mut() {
        match frame.resume(ctx, value.take())? {
            Resume::Call(child) => stack.push(child),
            Resume::Return(result) => {
                stack.pop();
                value = Some(result);
            }
        }
    }

    Ok(value.unwrap_or(Amount::ZERO))
}
