//! # Node Configuration
//!
//! Defaults suit a local node on the live network; every field can be
//! overridden from the environment.
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `BDM_NETWORK` | `test`, `beta`, `live` | `live` |
//! | `BDM_DATA_DIR` | path | `./data` |
//! | `BDM_STORE` | `memory`, `file`, `rocksdb` | `file` |
//! | `BDM_LOG` | tracing `EnvFilter` directives | `info` |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bdm_03_genesis::Network;
use thiserror::Error;

pub const ENV_NETWORK: &str = "BDM_NETWORK";
pub const ENV_DATA_DIR: &str = "BDM_DATA_DIR";
pub const ENV_STORE: &str = "BDM_STORE";
pub const ENV_LOG: &str = "BDM_LOG";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub network: Network,
    pub storage: StorageConfig,
    /// `EnvFilter` directives for the log subscriber.
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: Network::Live,
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(network) = lookup(ENV_NETWORK) {
            config.network = network
                .parse()
                .map_err(|_| ConfigError::InvalidNetwork(network))?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::EmptyDataDir);
            }
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_STORE) {
            config.storage.backend = backend.parse()?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

/// Which key-value engine backs the ledger store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Lost on exit.
    Memory,
    /// Single file per network under the data directory.
    File,
    /// RocksDB directory per network; needs the `rocksdb` feature.
    RocksDb,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::File => "file",
            StoreBackend::RocksDb => "rocksdb",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "rocksdb" => Ok(StoreBackend::RocksDb),
            _ => Err(ConfigError::InvalidStore(s.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// Directory holding one store per network.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StorageConfig {
    /// Path of the file-backed store for `network`.
    pub fn ledger_file(&self, network: Network) -> PathBuf {
        self.data_dir.join(format!("{}-ledger.db", network))
    }

    /// Directory of the RocksDB store for `network`.
    pub fn rocksdb_dir(&self, network: Network) -> PathBuf {
        self.data_dir.join(format!("{}-rocksdb", network))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown network '{0}', expected test, beta or live")]
    InvalidNetwork(String),

    #[error("Unknown store backend '{0}', expected memory, file or rocksdb")]
    InvalidStore(String),

    #[error("Data directory must not be empty")]
    EmptyDataDir,
}
