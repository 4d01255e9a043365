//! # Genesis Block
//!
//! The root `open` block of the network. Its `source` is the genesis account
//! itself: no send funded it, it mints the whole supply.

use bdm_01_block_model::{deserialize_block_json, Block, OpenBlock};
use bdm_02_ledger_store::{AccountInfo, LedgerStore, TimeSource, WriteTransaction};
use shared_types::{Account, Amount, BlockHash};
use tracing::info;

use crate::errors::GenesisError;

/// Checksum table slot seeded with the genesis hash.
const GENESIS_CHECKSUM_PREFIX: u64 = 0;
const GENESIS_CHECKSUM_MASK: u8 = 0;

/// The network's root block, parsed once from its JSON description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genesis {
    open: OpenBlock,
}

impl Genesis {
    /// Parse and verify a genesis description.
    pub fn parse(json: &str) -> Result<Self, GenesisError> {
        let open = match deserialize_block_json(json)? {
            Block::Open(open) => open,
            other => return Err(GenesisError::NotAnOpenBlock(other.block_type().as_str())),
        };
        let genesis = Self { open };
        genesis
            .block()
            .verify_signature(&genesis.account())
            .map_err(|_| GenesisError::InvalidSignature)?;
        Ok(genesis)
    }

    pub fn hash(&self) -> BlockHash {
        self.open.hash()
    }

    pub fn account(&self) -> Account {
        self.open.account()
    }

    pub fn open(&self) -> &OpenBlock {
        &self.open
    }

    pub fn block(&self) -> Block {
        Block::Open(self.open.clone())
    }

    /// Seed an empty store with the genesis block and its ledger entries.
    ///
    /// Fails with [`GenesisError::StoreNotEmpty`] before staging anything if
    /// the account table already has an entry.
    pub fn initialize(
        &self,
        store: &dyn LedgerStore,
        txn: &mut WriteTransaction<'_>,
        clock: &dyn TimeSource,
    ) -> Result<(), GenesisError> {
        if store.latest_begin(&*txn)?.is_some() {
            return Err(GenesisError::StoreNotEmpty);
        }

        let hash = self.hash();
        let account = self.account();
        store.block_put(txn, &hash, &self.block());
        store.account_put(
            txn,
            &account,
            &AccountInfo::new(hash, hash, hash, Amount::MAX, clock.now(), 1),
        );
        store.representation_put(txn, &account, Amount::MAX);
        store.checksum_put(txn, GENESIS_CHECKSUM_PREFIX, GENESIS_CHECKSUM_MASK, &hash);
        store.frontier_put(txn, &hash, &account);

        info!(%hash, %account, "Staged genesis block");
        Ok(())
    }
}
