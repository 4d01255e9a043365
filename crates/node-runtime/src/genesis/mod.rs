//! # Genesis Bootstrap
//!
//! On first start the store is empty and gets the network's genesis entries.
//! On later starts the store must already hold that same genesis block,
//! which catches a data directory reused across networks.

use bdm_02_ledger_store::{LedgerStore, TimeSource};
use bdm_03_genesis::{Genesis, GenesisError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisStatus {
    /// Genesis entries were written by this call.
    Created,
    /// The store already held this network's genesis block.
    Existing,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Store holds accounts but not genesis block {genesis}; wrong network or data directory?")]
    ForeignStore { genesis: String },

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Store(#[from] bdm_02_ledger_store::StoreError),
}

/// Seed an empty store with `genesis`, or check a populated one carries it.
pub fn ensure_genesis(
    store: &dyn LedgerStore,
    genesis: &Genesis,
    clock: &dyn TimeSource,
) -> Result<GenesisStatus, BootstrapError> {
    let mut txn = store.tx_begin_write();

    match genesis.initialize(store, &mut txn, clock) {
        Ok(()) => {
            store.commit(txn)?;
            info!(hash = %genesis.hash(), "Genesis block created");
            Ok(GenesisStatus::Created)
        }
        Err(GenesisError::StoreNotEmpty) => {
            if store.block_exists(&txn, &genesis.hash())? {
                info!(hash = %genesis.hash(), "Genesis block found, ledger initialized");
                Ok(GenesisStatus::Existing)
            } else {
                Err(BootstrapError::ForeignStore {
                    genesis: genesis.hash().encode_hex(),
                })
            }
        }
        Err(e) => Err(e.into()),
    }
}
