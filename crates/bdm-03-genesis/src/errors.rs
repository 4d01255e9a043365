use bdm_01_block_model::DeserializationError;
use bdm_02_ledger_store::StoreError;
use thiserror::Error;

/// Genesis construction and bootstrap errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    /// The embedded genesis description did not parse.
    #[error("Invalid genesis block: {0}")]
    InvalidBlock(#[from] DeserializationError),

    /// The embedded genesis description parsed as some other block kind.
    #[error("Genesis block must be an open block, found {0}")]
    NotAnOpenBlock(&'static str),

    /// The genesis signature does not match the genesis account.
    #[error("Genesis block signature does not verify against its account")]
    InvalidSignature,

    /// An embedded key constant did not decode.
    #[error("Invalid embedded key: {0}")]
    InvalidKey(String),

    /// Network name not recognised.
    #[error("Unknown network {0:?}: expected test, beta or live")]
    UnknownNetwork(String),

    /// `initialize` requires an empty account table.
    #[error("Ledger store already contains accounts; genesis can only seed an empty store")]
    StoreNotEmpty,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
