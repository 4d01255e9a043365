//! Key layout of the ledger tables inside a flat key-value store.

use shared_types::{Account, BlockHash};

use super::records::PendingKey;

/// One key prefix per ledger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `b:{hash}` -> type-prefixed block
    Block,
    /// `i:{hash}` -> BlockInfo
    BlockInfo,
    /// `a:{account}` -> AccountInfo
    Account,
    /// `p:{account}{hash}` -> PendingInfo
    Pending,
    /// `r:{account}` -> weight (16 bytes, big-endian)
    Representation,
    /// `c:{prefix u64 BE}{mask}` -> hash
    Checksum,
    /// `f:{hash}` -> account
    Frontier,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Block => b"b:",
            KeyPrefix::BlockInfo => b"i:",
            KeyPrefix::Account => b"a:",
            KeyPrefix::Pending => b"p:",
            KeyPrefix::Representation => b"r:",
            KeyPrefix::Checksum => b"c:",
            KeyPrefix::Frontier => b"f:",
        }
    }

    /// Table name used in error reports and logs.
    pub fn table(&self) -> &'static str {
        match self {
            KeyPrefix::Block => "blocks",
            KeyPrefix::BlockInfo => "block_info",
            KeyPrefix::Account => "accounts",
            KeyPrefix::Pending => "pending",
            KeyPrefix::Representation => "representation",
            KeyPrefix::Checksum => "checksum",
            KeyPrefix::Frontier => "frontiers",
        }
    }

    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(2 + suffix.len());
        key.extend_from_slice(self.as_bytes());
        key.extend_from_slice(suffix);
        key
    }

    pub fn block_key(hash: &BlockHash) -> Vec<u8> {
        KeyPrefix::Block.key(hash.as_bytes())
    }

    pub fn block_info_key(hash: &BlockHash) -> Vec<u8> {
        KeyPrefix::BlockInfo.key(hash.as_bytes())
    }

    pub fn account_key(account: &Account) -> Vec<u8> {
        KeyPrefix::Account.key(account.as_bytes())
    }

    pub fn pending_key(key: &PendingKey) -> Vec<u8> {
        KeyPrefix::Pending.key(&key.to_bytes())
    }

    pub fn representation_key(account: &Account) -> Vec<u8> {
        KeyPrefix::Representation.key(account.as_bytes())
    }

    pub fn checksum_key(prefix: u64, mask: u8) -> Vec<u8> {
        let mut suffix = [0u8; 9];
        suffix[..8].copy_from_slice(&prefix.to_be_bytes());
        suffix[8] = mask;
        KeyPrefix::Checksum.key(&suffix)
    }

    pub fn frontier_key(hash: &BlockHash) -> Vec<u8> {
        KeyPrefix::Frontier.key(hash.as_bytes())
    }

    /// Strip this table's prefix from a full key.
    pub fn suffix<'a>(&self, key: &'a [u8]) -> Option<&'a [u8]> {
        key.strip_prefix(self.as_bytes())
    }
}
