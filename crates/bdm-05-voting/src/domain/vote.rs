//! A representative's signed claim that `block` is the chain tip it backs.
//!
//! Wire format: `account(32) ‖ signature(64) ‖ sequence(8, LE) ‖ block`,
//! where the block is type-prefixed unless the carrier sends the type out
//! of band.

use std::sync::Arc;

use bdm_01_block_model::{
    deserialize_block, deserialize_block_with_type, serialize_block_into, Block, BlockType,
};
use serde_json::{json, Value};
use shared_crypto::{sign_message, validate_message, Blake2b256Hasher};
use shared_types::{Account, BlockHash, ByteReader, RawKey, Signature};
use tracing::warn;

use super::errors::VoteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    account: Account,
    signature: Signature,
    sequence: u64,
    block: Arc<Block>,
}

impl Vote {
    /// Account, signature and sequence preceding the block.
    pub const HEADER_SIZE: usize = 32 + 64 + 8;

    /// Build and sign a vote for `block` as `account`.
    pub fn new(account: Account, prv: &RawKey, sequence: u64, block: Arc<Block>) -> Self {
        let hash = Self::signing_hash(&block, sequence);
        Self {
            account,
            signature: sign_message(prv, &account, hash.as_bytes()),
            sequence,
            block,
        }
    }

    pub fn from_parts(
        account: Account,
        signature: Signature,
        sequence: u64,
        block: Arc<Block>,
    ) -> Self {
        Self {
            account,
            signature,
            sequence,
            block,
        }
    }

    fn signing_hash(block: &Block, sequence: u64) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher
            .update(block.hash().as_bytes())
            .update(sequence.to_le_bytes());
        BlockHash::from_bytes(hasher.finalize())
    }

    /// Digest the voter signs: `blake2b_256(block.hash ‖ sequence LE)`.
    pub fn hash(&self) -> BlockHash {
        Self::signing_hash(&self.block, self.sequence)
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn block(&self) -> &Arc<Block> {
        &self.block
    }

    /// Check the signature against the voting account.
    pub fn validate(&self) -> Result<(), VoteError> {
        validate_message(&self.account, self.hash().as_bytes(), &self.signature).map_err(|_| {
            warn!(account = %self.account, sequence = self.sequence, "Rejected vote with bad signature");
            VoteError::InvalidSignature
        })
    }

    fn serialize_header(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.account.as_bytes());
        out.extend_from_slice(self.signature.as_bytes());
        out.extend_from_slice(&self.sequence.to_le_bytes());
    }

    /// Append the vote with a type-prefixed block.
    pub fn serialize(&self, out: &mut Vec<u8>) {
        self.serialize_header(out);
        serialize_block_into(&self.block, out);
    }

    /// Append the vote with the block body only; the reader must learn the
    /// block type elsewhere.
    pub fn serialize_untyped(&self, out: &mut Vec<u8>) {
        self.serialize_header(out);
        self.block.serialize(out);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_SIZE + 1 + self.block.serialized_size());
        self.serialize(&mut out);
        out
    }

    fn deserialize_header(
        reader: &mut ByteReader<'_>,
    ) -> Result<(Account, Signature, u64), VoteError> {
        let account = Account::from_bytes(reader.read_array()?);
        let signature = Signature::from_bytes(reader.read_array()?);
        let sequence = reader.read_u64_le()?;
        Ok((account, signature, sequence))
    }

    /// Read a vote whose block carries its own type tag.
    pub fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, VoteError> {
        let (account, signature, sequence) = Self::deserialize_header(reader)?;
        let block = deserialize_block(reader)?;
        Ok(Self::from_parts(account, signature, sequence, Arc::new(block)))
    }

    /// Read a vote whose block type was transmitted out of band.
    pub fn deserialize_with_type(
        reader: &mut ByteReader<'_>,
        block_type: BlockType,
    ) -> Result<Self, VoteError> {
        let (account, signature, sequence) = Self::deserialize_header(reader)?;
        let block = deserialize_block_with_type(block_type, reader)?;
        Ok(Self::from_parts(account, signature, sequence, Arc::new(block)))
    }

    /// Decode a complete stored vote; trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VoteError> {
        let mut reader = ByteReader::new(bytes);
        let vote = Self::deserialize(&mut reader)?;
        match reader.remaining() {
            0 => Ok(vote),
            extra => Err(VoteError::TrailingBytes(extra)),
        }
    }

    pub fn to_json_value(&self) -> Value {
        json!({
            "account": self.account.encode_account(),
            "signature": self.signature.encode_hex(),
            "sequence": self.sequence.to_string(),
            "block": self.block.to_json(),
        })
    }

    pub fn to_json(&self) -> String {
        format!("{:#}", self.to_json_value())
    }
}
