use bdm_02_ledger_store::StoreError;
use shared_types::BlockHash;
use thiserror::Error;

/// Errors raised while walking an account chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// An amount lookup reached a hash that is not in the store and is not
    /// the genesis sentinel. Either the store is damaged or a peer supplied
    /// a block referencing something that does not exist.
    #[error("Broken chain: block {hash} is missing")]
    BrokenChain { hash: BlockHash },

    /// A balance or representative lookup reached a missing predecessor.
    #[error("Corrupt ledger: block {hash} is missing")]
    CorruptLedger { hash: BlockHash },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
