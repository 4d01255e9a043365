//! # Ledger Queries
//!
//! Read-side facade over a [`LedgerStore`]: the chain walks plus the
//! per-account lookups callers usually want alongside them.

use std::sync::Arc;

use bdm_02_ledger_store::{BlockCounts, LedgerStore, Transaction};
use bdm_03_genesis::LedgerConstants;
use shared_types::{Account, Amount, BlockHash};

use crate::errors::WalkError;
use crate::visitors::{AmountVisitor, BalanceVisitor, RepresentativeVisitor};

/// Ledger query facade bound to one store and one network's constants.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    constants: LedgerConstants,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>, constants: LedgerConstants) -> Self {
        Self { store, constants }
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub fn constants(&self) -> &LedgerConstants {
        &self.constants
    }

    /// Value moved by the block `hash`.
    pub fn amount(&self, txn: &dyn Transaction, hash: &BlockHash) -> Result<Amount, WalkError> {
        AmountVisitor::new(txn, self.store(), &self.constants).compute(hash)
    }

    /// Balance of the owning account as of block `hash`.
    pub fn balance(&self, txn: &dyn Transaction, hash: &BlockHash) -> Result<Amount, WalkError> {
        BalanceVisitor::new(txn, self.store(), &self.constants).compute(hash)
    }

    /// Hash of the block that set the representative in effect at `hash`.
    pub fn representative(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<BlockHash, WalkError> {
        RepresentativeVisitor::new(txn, self.store()).compute(hash)
    }

    /// Representative account in effect at `hash`.
    pub fn representative_account(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Account, WalkError> {
        let rep_block = self.representative(txn, hash)?;
        self.store()
            .block_get(txn, &rep_block)?
            .and_then(|block| block.representative())
            .ok_or(WalkError::CorruptLedger { hash: rep_block })
    }

    /// Current balance of `account`; zero for an unopened account.
    pub fn account_balance(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Amount, WalkError> {
        Ok(self
            .store()
            .account_get(txn, account)?
            .map(|info| info.balance)
            .unwrap_or(Amount::ZERO))
    }

    /// Head block of `account`, if it has been opened.
    pub fn latest(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Option<BlockHash>, WalkError> {
        Ok(self.store().account_get(txn, account)?.map(|info| info.head))
    }

    /// Root the next block of `account` must reference: its head, or the
    /// account itself when unopened.
    pub fn latest_root(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<BlockHash, WalkError> {
        Ok(self
            .latest(txn, account)?
            .unwrap_or_else(|| BlockHash::from_bytes(*account.as_bytes())))
    }

    /// Voting weight delegated to `account`.
    pub fn weight(&self, txn: &dyn Transaction, account: &Account) -> Result<Amount, WalkError> {
        Ok(self.store().representation_get(txn, account)?)
    }

    pub fn block_counts(&self, txn: &dyn Transaction) -> Result<BlockCounts, WalkError> {
        Ok(self.store().block_count(txn)?)
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("constants", &self.constants)
            .finish_non_exhaustive()
    }
}
