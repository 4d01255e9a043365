//! # Ledger Metadata Records
//!
//! Fixed-width packed records persisted per account or per block. Fields are
//! written in declared order with no padding; the byte layout is the durable
//! on-disk contract.
//!
//! | Record | Layout | Size |
//! |--------|--------|------|
//! | `AccountInfo` | head ‖ rep_block ‖ open_block ‖ balance ‖ modified ‖ block_count | 128 |
//! | `PendingKey` | account ‖ hash | 64 |
//! | `PendingInfo` | source ‖ amount | 48 |
//! | `BlockInfo` | account ‖ balance | 48 |
//!
//! Hashes, accounts and amounts are big-endian. The two 64-bit counters of
//! `AccountInfo` are little-endian.

use bdm_01_block_model::BlockType;
use shared_types::{Account, Amount, BlockHash, ByteReader};

use super::errors::RecordError;

fn check_len(record: &'static str, expected: usize, bytes: &[u8]) -> Result<(), RecordError> {
    if bytes.len() != expected {
        return Err(RecordError::InvalidLength {
            record,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Per-account chain cursor. Each write replaces the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountInfo {
    /// Latest block in the chain.
    pub head: BlockHash,
    /// Block that last set the representative.
    pub rep_block: BlockHash,
    pub open_block: BlockHash,
    pub balance: Amount,
    /// Unix seconds of the last update.
    pub modified: u64,
    pub block_count: u64,
}

impl AccountInfo {
    pub const SIZE: usize = 32 + 32 + 32 + 16 + 8 + 8;

    pub fn new(
        head: BlockHash,
        rep_block: BlockHash,
        open_block: BlockHash,
        balance: Amount,
        modified: u64,
        block_count: u64,
    ) -> Self {
        Self {
            head,
            rep_block,
            open_block,
            balance,
            modified,
            block_count,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..32].copy_from_slice(self.head.as_bytes());
        out[32..64].copy_from_slice(self.rep_block.as_bytes());
        out[64..96].copy_from_slice(self.open_block.as_bytes());
        out[96..112].copy_from_slice(&self.balance.to_be_bytes());
        out[112..120].copy_from_slice(&self.modified.to_le_bytes());
        out[120..128].copy_from_slice(&self.block_count.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("account_info", Self::SIZE, bytes)?;
        let mut reader = ByteReader::new(bytes);
        Ok(Self {
            head: BlockHash::from_bytes(reader.read_array()?),
            rep_block: BlockHash::from_bytes(reader.read_array()?),
            open_block: BlockHash::from_bytes(reader.read_array()?),
            balance: Amount::from_be_bytes(reader.read_array()?),
            modified: reader.read_u64_le()?,
            block_count: reader.read_u64_le()?,
        })
    }
}

/// Key of a receivable entry: destination account, then the send hash.
///
/// Ordering is by account first, so every pending entry of one destination
/// is contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PendingKey {
    pub account: Account,
    pub hash: BlockHash,
}

impl PendingKey {
    pub const SIZE: usize = 32 + 32;

    pub fn new(account: Account, hash: BlockHash) -> Self {
        Self { account, hash }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..32].copy_from_slice(self.account.as_bytes());
        out[32..].copy_from_slice(self.hash.as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("pending_key", Self::SIZE, bytes)?;
        let mut reader = ByteReader::new(bytes);
        Ok(Self {
            account: Account::from_bytes(reader.read_array()?),
            hash: BlockHash::from_bytes(reader.read_array()?),
        })
    }
}

/// Value of a receivable entry: who sent it and how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingInfo {
    pub source: Account,
    pub amount: Amount,
}

impl PendingInfo {
    pub const SIZE: usize = 32 + 16;

    pub fn new(source: Account, amount: Amount) -> Self {
        Self { source, amount }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..32].copy_from_slice(self.source.as_bytes());
        out[32..].copy_from_slice(&self.amount.to_be_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("pending_info", Self::SIZE, bytes)?;
        let mut reader = ByteReader::new(bytes);
        Ok(Self {
            source: Account::from_bytes(reader.read_array()?),
            amount: Amount::from_be_bytes(reader.read_array()?),
        })
    }
}

/// Cached `(account, balance)` at a legacy receive/change block. Absence
/// means the balance has to be recomputed by walking the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockInfo {
    pub account: Account,
    pub balance: Amount,
}

impl BlockInfo {
    pub const SIZE: usize = 32 + 16;

    pub fn new(account: Account, balance: Amount) -> Self {
        Self { account, balance }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..32].copy_from_slice(self.account.as_bytes());
        out[32..].copy_from_slice(&self.balance.to_be_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("block_info", Self::SIZE, bytes)?;
        let mut reader = ByteReader::new(bytes);
        Ok(Self {
            account: Account::from_bytes(reader.read_array()?),
            balance: Amount::from_be_bytes(reader.read_array()?),
        })
    }
}

/// Number of stored blocks of each kind. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockCounts {
    pub send: u64,
    pub receive: u64,
    pub open: u64,
    pub change: u64,
    pub state: u64,
}

impl BlockCounts {
    pub fn sum(&self) -> u64 {
        self.send + self.receive + self.open + self.change + self.state
    }

    /// Count one block of `block_type`. Reserved tags are ignored.
    pub fn add(&mut self, block_type: BlockType) {
        match block_type {
            BlockType::Send => self.send += 1,
            BlockType::Receive => self.receive += 1,
            BlockType::Open => self.open += 1,
            BlockType::Change => self.change += 1,
            BlockType::State => self.state += 1,
            BlockType::Invalid | BlockType::NotABlock => {}
        }
    }
}
