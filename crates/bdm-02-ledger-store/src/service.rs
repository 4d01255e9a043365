//! # Key-Value Ledger Store
//!
//! [`LedgerStore`] implemented over any [`KeyValueStore`], one key prefix
//! per table (see [`KeyPrefix`]).
//!
//! Reads through a write transaction consult its staged writes first and
//! fall back to the committed data.

use std::collections::BTreeMap;

use bdm_01_block_model::{block_from_bytes, serialize_block, Block, BlockType};
use parking_lot::{Mutex, RwLock};
use shared_types::{Account, Amount, BlockHash};
use tracing::{debug, warn};

use crate::adapters::InMemoryKVStore;
use crate::domain::{
    AccountInfo, BlockCounts, BlockInfo, KeyPrefix, PendingInfo, PendingKey, RecordError,
    StoreError,
};
use crate::ports::{KeyValueStore, LedgerStore, ReadTransaction, Transaction, WriteTransaction};

/// Ledger store over a byte-oriented key-value engine.
pub struct KvLedgerStore<K: KeyValueStore> {
    kv: RwLock<K>,
    writer: Mutex<()>,
}

impl KvLedgerStore<InMemoryKVStore> {
    /// Create a store backed by an empty in-memory engine.
    pub fn new_in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<K: KeyValueStore> KvLedgerStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv: RwLock::new(kv),
            writer: Mutex::new(()),
        }
    }

    /// Unwrap the underlying engine.
    pub fn into_inner(self) -> K {
        self.kv.into_inner()
    }

    fn read(&self, txn: &dyn Transaction, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(staged) = txn.staged().and_then(|writes| writes.get(key)) {
            return Ok(staged.clone());
        }
        Ok(self.kv.read().get(key)?)
    }

    /// Committed entries under `prefix` with the transaction's staged writes
    /// applied on top, in key order.
    fn scan(&self, txn: &dyn Transaction, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.kv.read().prefix_scan(prefix)?.into_iter().collect();
        if let Some(writes) = txn.staged() {
            for (key, value) in writes.range(prefix.to_vec()..) {
                if !key.starts_with(prefix) {
                    break;
                }
                match value {
                    Some(value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }
        Ok(merged.into_iter().collect())
    }

    fn decode<T>(
        prefix: KeyPrefix,
        bytes: &[u8],
        decode: impl FnOnce(&[u8]) -> Result<T, RecordError>,
    ) -> Result<T, StoreError> {
        decode(bytes).map_err(|source| {
            warn!(table = prefix.table(), %source, "Rejected corrupt ledger entry");
            StoreError::Corrupt {
                table: prefix.table(),
                source,
            }
        })
    }

    fn decode_array<const N: usize>(prefix: KeyPrefix, bytes: &[u8]) -> Result<[u8; N], StoreError> {
        Self::decode(prefix, bytes, |bytes| {
            bytes.try_into().map_err(|_| RecordError::InvalidLength {
                record: prefix.table(),
                expected: N,
                actual: bytes.len(),
            })
        })
    }

    fn decode_account_entry(key: &[u8], value: &[u8]) -> Result<(Account, AccountInfo), StoreError> {
        let suffix = KeyPrefix::Account.suffix(key).unwrap_or_default();
        let account = Account::from_bytes(Self::decode_array(KeyPrefix::Account, suffix)?);
        let info = Self::decode(KeyPrefix::Account, value, AccountInfo::from_bytes)?;
        Ok((account, info))
    }
}

impl<K: KeyValueStore> LedgerStore for KvLedgerStore<K> {
    fn tx_begin_read(&self) -> ReadTransaction {
        ReadTransaction::new()
    }

    fn tx_begin_write(&self) -> WriteTransaction<'_> {
        WriteTransaction::new(self.writer.lock())
    }

    fn commit(&self, txn: WriteTransaction<'_>) -> Result<(), StoreError> {
        let (batch, _writer) = txn.into_batch();
        let operations = batch.len();
        self.kv.write().atomic_batch_write(batch)?;
        debug!(operations, "Committed write transaction");
        Ok(())
    }

    fn block_get(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError> {
        match self.read(txn, &KeyPrefix::block_key(hash))? {
            Some(bytes) => Ok(Some(block_from_bytes(&bytes).map_err(|e| {
                warn!(%hash, error = %e, "Rejected corrupt stored block");
                e
            })?)),
            None => Ok(None),
        }
    }

    fn block_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, block: &Block) {
        txn.put(KeyPrefix::block_key(hash), serialize_block(block));
    }

    fn block_exists(&self, txn: &dyn Transaction, hash: &BlockHash) -> Result<bool, StoreError> {
        let key = KeyPrefix::block_key(hash);
        if let Some(staged) = txn.staged().and_then(|writes| writes.get(&key)) {
            return Ok(staged.is_some());
        }
        Ok(self.kv.read().exists(&key)?)
    }

    fn block_count(&self, txn: &dyn Transaction) -> Result<BlockCounts, StoreError> {
        let mut counts = BlockCounts::default();
        for (_, value) in self.scan(txn, KeyPrefix::Block.as_bytes())? {
            match value.first().copied().and_then(BlockType::from_u8) {
                Some(block_type) => counts.add(block_type),
                None => warn!("Stored block with unrecognised type tag"),
            }
        }
        Ok(counts)
    }

    fn block_info_get(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Option<BlockInfo>, StoreError> {
        self.read(txn, &KeyPrefix::block_info_key(hash))?
            .map(|bytes| Self::decode(KeyPrefix::BlockInfo, &bytes, BlockInfo::from_bytes))
            .transpose()
    }

    fn block_info_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, info: &BlockInfo) {
        txn.put(KeyPrefix::block_info_key(hash), info.to_bytes().to_vec());
    }

    fn account_get(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Option<AccountInfo>, StoreError> {
        self.read(txn, &KeyPrefix::account_key(account))?
            .map(|bytes| Self::decode(KeyPrefix::Account, &bytes, AccountInfo::from_bytes))
            .transpose()
    }

    fn account_put(&self, txn: &mut WriteTransaction<'_>, account: &Account, info: &AccountInfo) {
        txn.put(KeyPrefix::account_key(account), info.to_bytes().to_vec());
    }

    fn account_del(&self, txn: &mut WriteTransaction<'_>, account: &Account) {
        txn.delete(KeyPrefix::account_key(account));
    }

    fn latest_begin(
        &self,
        txn: &dyn Transaction,
    ) -> Result<Option<(Account, AccountInfo)>, StoreError> {
        self.scan(txn, KeyPrefix::Account.as_bytes())?
            .first()
            .map(|(key, value)| Self::decode_account_entry(key, value))
            .transpose()
    }

    fn accounts(&self, txn: &dyn Transaction) -> Result<Vec<(Account, AccountInfo)>, StoreError> {
        self.scan(txn, KeyPrefix::Account.as_bytes())?
            .iter()
            .map(|(key, value)| Self::decode_account_entry(key, value))
            .collect()
    }

    fn pending_get(
        &self,
        txn: &dyn Transaction,
        key: &PendingKey,
    ) -> Result<Option<PendingInfo>, StoreError> {
        self.read(txn, &KeyPrefix::pending_key(key))?
            .map(|bytes| Self::decode(KeyPrefix::Pending, &bytes, PendingInfo::from_bytes))
            .transpose()
    }

    fn pending_put(&self, txn: &mut WriteTransaction<'_>, key: &PendingKey, info: &PendingInfo) {
        txn.put(KeyPrefix::pending_key(key), info.to_bytes().to_vec());
    }

    fn pending_del(&self, txn: &mut WriteTransaction<'_>, key: &PendingKey) {
        txn.delete(KeyPrefix::pending_key(key));
    }

    fn pending_for(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Vec<(PendingKey, PendingInfo)>, StoreError> {
        let prefix = KeyPrefix::Pending.key(account.as_bytes());
        self.scan(txn, &prefix)?
            .iter()
            .map(|(key, value)| {
                let suffix = KeyPrefix::Pending.suffix(key).unwrap_or_default();
                let key = Self::decode(KeyPrefix::Pending, suffix, PendingKey::from_bytes)?;
                let info = Self::decode(KeyPrefix::Pending, value, PendingInfo::from_bytes)?;
                Ok((key, info))
            })
            .collect()
    }

    fn representation_get(
        &self,
        txn: &dyn Transaction,
        account: &Account,
    ) -> Result<Amount, StoreError> {
        match self.read(txn, &KeyPrefix::representation_key(account))? {
            Some(bytes) => Ok(Amount::from_be_bytes(Self::decode_array(
                KeyPrefix::Representation,
                &bytes,
            )?)),
            None => Ok(Amount::ZERO),
        }
    }

    fn representation_put(&self, txn: &mut WriteTransaction<'_>, account: &Account, weight: Amount) {
        txn.put(
            KeyPrefix::representation_key(account),
            weight.to_be_bytes().to_vec(),
        );
    }

    fn checksum_get(
        &self,
        txn: &dyn Transaction,
        prefix: u64,
        mask: u8,
    ) -> Result<Option<BlockHash>, StoreError> {
        self.read(txn, &KeyPrefix::checksum_key(prefix, mask))?
            .map(|bytes| Self::decode_array(KeyPrefix::Checksum, &bytes).map(BlockHash::from_bytes))
            .transpose()
    }

    fn checksum_put(&self, txn: &mut WriteTransaction<'_>, prefix: u64, mask: u8, hash: &BlockHash) {
        txn.put(
            KeyPrefix::checksum_key(prefix, mask),
            hash.as_bytes().to_vec(),
        );
    }

    fn frontier_get(
        &self,
        txn: &dyn Transaction,
        hash: &BlockHash,
    ) -> Result<Option<Account>, StoreError> {
        self.read(txn, &KeyPrefix::frontier_key(hash))?
            .map(|bytes| Self::decode_array(KeyPrefix::Frontier, &bytes).map(Account::from_bytes))
            .transpose()
    }

    fn frontier_put(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash, account: &Account) {
        txn.put(KeyPrefix::frontier_key(hash), account.as_bytes().to_vec());
    }

    fn frontier_del(&self, txn: &mut WriteTransaction<'_>, hash: &BlockHash) {
        txn.delete(KeyPrefix::frontier_key(hash));
    }
}
