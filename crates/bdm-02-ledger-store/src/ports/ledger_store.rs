//! # Ledger Store Port
//!
//! The transactional store every ledger query and update goes through.
//!
//! ## Transactions
//!
//! - Any number of [`ReadTransaction`]s may be open at once. Reads see
//!   committed data.
//! - At most one [`WriteTransaction`] exists at a time; it holds the store's
//!   writer lock for its whole lifetime. Writes are staged in the
//!   transaction, visible to reads made through it, and applied in one
//!   atomic batch by [`LedgerStore::commit`]. Dropping it uncommitted
//!   discards every staged write.

use std::collections::BTreeMap;

use bdm_01_block_model::Block;
use parking_lot::MutexGuard;
use shared_types::{Account, Amount, BlockHash};

use crate::domain::{AccountInfo, BlockCounts, BlockInfo, PendingInfo, PendingKey, StoreError};
use crate::ports::outbound::BatchOperation;

/// Staged writes of a transaction: `Some(value)` is a put, `None` a delete.
pub type StagedWrites = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Handle passed to every store read.
pub trait Transaction {
    /// Writes staged by this transaction, if it is a write transaction.
    fn staged(&self) -> Option<&StagedWrites>;
}

/// Read-only transaction.
#[derive(Debug, Default)]
pub struct ReadTransaction {
    _private: (),
}

impl ReadTransaction {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transaction for ReadTransaction {
    fn staged(&self) -> Option<&StagedWrites> {
        None
    }
}

/// Exclusive write transaction.
pub struct WriteTransaction<'a> {
    _writer: MutexGuard<'a, ()>,
    staged: StagedWrites,
}

impl<'a> WriteTransaction<'a> {
    /// Wrap the store's writer lock.
    pub fn new(writer: MutexGuard<'a, ()>) -> Self {
        Self {
            _writer: writer,
            staged: StagedWrites::new(),
        }
    }

    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.staged.insert(key, Some(value));
    }

    pub fn delete(&mut self, key: Vec<u8>) {
        self.staged.insert(key, None);
    }

    /// Number of staged operations.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Consume the transaction, releasing the writer lock once the returned
    /// batch has been applied by the caller.
    pub fn into_batch(self) -> (Vec<BatchOperation>, MutexGuard<'a, ()>) {
        let batch = self
            .staged
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::Put { key, value },
                None => BatchOperation::Delete { key },
            })
            .collect();
        (batch, self._writer)
    }
}

impl Transaction for WriteTransaction<'_> {
    fn staged(&self) -> Option<&StagedWrites> {
        Some(&self.staged)
    }
}

impl std::fmt::Debug for WriteTransaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteTransaction")
            .field("staged", &self.staged.len())
            .finish()
    }
}

/// Transactional access to the ledger tables.
///
/// Reads take any [`Transaction`]; writes are staged into a
/// [`WriteTransaction`] and only become durable on [`LedgerStore::commit`].
pub trait LedgerStore: Send + Sync {
    fn tx_begin_read(&self) -> ReadTransaction;

    /// Blocks until no other write transaction is open.
    fn tx_begin_write(&self) -> WriteTransaction<'_>;

    fn commit(&self, txn: WriteTransaction<'_>) -> Result<(), StoreError>;

    // ---- blocks ----

    fn block_get(&self, txn: &dyn Transaction, hash: &BlockHash)
        -> Result<Option<Block>, StoreError>;

    fn block_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, block: &Block);

    fn block_exists(&self, txn: &dyn Transaction, hash: &BlockHash) -> Result<bool, StoreError>;

    fn block_count(&self, txn: &dyn Transaction) -> Result<BlockCounts, StoreError>;

    // ---- block_info ----

    fn block_info_get(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Option<BlockInfo>, StoreError>;

    fn block_info_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, info: &BlockInfo);

    // ---- accounts ----

    fn account_get(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Option<AccountInfo>, StoreError>;

    fn account_put(&self, txn: &mut WriteTransaction<'_>, account: &Account, info: &AccountInfo);

    fn account_del(&self, txn: &mut WriteTransaction<'_>, account: &Account);

    /// First entry of the account table in key order, or `None` when the
    /// table is empty (begin == end).
    fn latest_begin(
        &self,
        txn: &dyn Transaction,
    ) -> Result<Option<(Account, AccountInfo)>, StoreError>;

    /// Every account entry in key order.
    fn accounts(&self, txn: &dyn Transaction) -> Result<Vec<(Account, AccountInfo)>, StoreError>;

    // ---- pending ----

    fn pending_get(
        &self,
        txn: &dyn Transaction,
        key: &PendingKey,
    ) -> Result<Option<PendingInfo>, StoreError>;

    fn pending_put(&self, txn: &mut WriteTransaction<'_>, key: &PendingKey, info: &PendingInfo);

    fn pending_del(&self, txn: &mut WriteTransaction<'_>, key: &PendingKey);

    /// Receivable entries addressed to `account`.
    fn pending_for(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Vec<(PendingKey, PendingInfo)>, StoreError>;

    // ---- representation ----

    /// Voting weight delegated to `account`; zero when never set.
    fn representation_get(&self, txn: &dyn Transaction, account: &Account)
        -> Result<Amount, StoreError>;

    fn representation_put(&self, txn: &mut WriteTransaction<'_>, account: &Account, weight: Amount);

    // ---- checksum ----

    fn checksum_get(
        &self,
        txn: &dyn Transaction,
        prefix: u64,
        mask: u8,
    ) -> Result<Option<BlockHash>, StoreError>;

    fn checksum_put(&self, txn: &mut WriteTransaction<'_>, prefix: u64, mask: u8, hash: &BlockHash);

    // ---- frontiers ----

    fn frontier_get(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Option<Account>, StoreError>;

    fn frontier_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, account: &Account);

    /// Drop the entry for a head that has been superseded.
    fn frontier_del(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash);
}
