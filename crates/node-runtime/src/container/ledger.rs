//! # Ledger Container
//!
//! Owns the network parameters, the opened store and the query facade the
//! rest of the node reads through.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use bdm_02_ledger_store::{
    FileBackedKVStore, KvLedgerStore, LedgerStore, SystemTimeSource, TimeSource,
};
use bdm_03_genesis::NetworkParameters;
use bdm_04_chain_walk::Ledger;
use shared_types::Amount;
use tracing::info;

use crate::container::config::{NodeConfig, StoreBackend};
use crate::genesis::{ensure_genesis, GenesisStatus};

/// Snapshot of ledger totals reported at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub blocks: u64,
    pub send: u64,
    pub receive: u64,
    pub open: u64,
    pub change: u64,
    pub state: u64,
    pub accounts: usize,
    pub genesis_balance: Amount,
    /// Total of unreceived sends addressed to the burn account.
    pub burned: Amount,
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks (send {}, receive {}, open {}, change {}, state {}), {} accounts, genesis balance {}, burned {}",
            self.blocks,
            self.send,
            self.receive,
            self.open,
            self.change,
            self.state,
            self.accounts,
            self.genesis_balance,
            self.burned
        )
    }
}

pub struct LedgerContainer {
    pub config: NodeConfig,
    pub params: NetworkParameters,
    pub ledger: Ledger,
    pub genesis_status: GenesisStatus,
}

impl LedgerContainer {
    /// Open the configured store and make sure it carries this network's
    /// genesis.
    pub fn open(config: NodeConfig) -> Result<Self> {
        Self::open_with_clock(config, &SystemTimeSource)
    }

    pub fn open_with_clock(config: NodeConfig, clock: &dyn TimeSource) -> Result<Self> {
        let params = NetworkParameters::new(config.network)
            .with_context(|| format!("Failed to load {} network parameters", config.network))?;
        let store = open_store(&config)?;

        let genesis_status = ensure_genesis(store.as_ref(), params.genesis(), clock)
            .context("Failed to bootstrap genesis")?;

        let ledger = Ledger::new(store, params.ledger_constants());
        info!(
            network = %config.network,
            backend = %config.storage.backend,
            genesis = %params.genesis().hash(),
            "Ledger opened"
        );

        Ok(Self {
            config,
            params,
            ledger,
            genesis_status,
        })
    }

    pub fn summary(&self) -> Result<LedgerSummary> {
        let store = self.ledger.store();
        let txn = store.tx_begin_read();
        let counts = self.ledger.block_counts(&txn)?;
        let accounts = store.accounts(&txn)?.len();
        let genesis_balance = self
            .ledger
            .account_balance(&txn, &self.params.genesis_account())?;
        let burned = store
            .pending_for(&txn, &self.params.burn_account())?
            .into_iter()
            .fold(Amount::ZERO, |total, (_, info)| total.wrapping_add(info.amount));

        Ok(LedgerSummary {
            blocks: counts.sum(),
            send: counts.send,
            receive: counts.receive,
            open: counts.open,
            change: counts.change,
            state: counts.state,
            accounts,
            genesis_balance,
            burned,
        })
    }
}

fn open_store(config: &NodeConfig) -> Result<Arc<dyn LedgerStore>> {
    let storage = &config.storage;
    match storage.backend {
        StoreBackend::Memory => Ok(Arc::new(KvLedgerStore::new_in_memory())),
        StoreBackend::File => {
            let path = storage.ledger_file(config.network);
            let engine = FileBackedKVStore::open(&path)
                .with_context(|| format!("Failed to open ledger file {}", path.display()))?;
            Ok(Arc::new(KvLedgerStore::new(engine)))
        }
        StoreBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &NodeConfig) -> Result<Arc<dyn LedgerStore>> {
    use crate::adapters::{RocksDbConfig, RocksDbStore};

    let path = config.storage.rocksdb_dir(config.network);
    let engine = RocksDbStore::open(RocksDbConfig::new(&path))
        .with_context(|| format!("Failed to open RocksDB at {}", path.display()))?;
    Ok(Arc::new(KvLedgerStore::new(engine)))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &NodeConfig) -> Result<Arc<dyn LedgerStore>> {
    anyhow::bail!("RocksDB store requested but node-runtime was built without the `rocksdb` feature")
}
