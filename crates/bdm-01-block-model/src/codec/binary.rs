//! # Binary Block Codec
//!
//! ```text
//! [type tag: 1][body: fixed size per variant]
//! ```
//!
//! Hash, account, link and amount fields are written big-endian. The work
//! nonce is little-endian for the legacy variants and big-endian for state
//! blocks, matching the layouts already on the wire.

use shared_types::{Account, Amount, BlockHash, ByteReader, Link, Signature};
use tracing::warn;

use crate::domain::{
    Block, BlockType, ChangeBlock, DeserializationError, OpenBlock, ReceiveBlock, SendBlock,
    StateBlock,
};

impl Block {
    /// Append the variant body (no type tag) to `out`.
    pub fn serialize(&self, out: &mut Vec<u8>) {
        match self {
            Block::Send(b) => {
                out.extend_from_slice(b.previous().as_bytes());
                out.extend_from_slice(b.destination().as_bytes());
                out.extend_from_slice(&b.balance().to_be_bytes());
                out.extend_from_slice(b.signature().as_bytes());
                out.extend_from_slice(&b.work().to_le_bytes());
            }
            Block::Receive(b) => {
                out.extend_from_slice(b.previous().as_bytes());
                out.extend_from_slice(b.source().as_bytes());
                out.extend_from_slice(b.signature().as_bytes());
                out.extend_from_slice(&b.work().to_le_bytes());
            }
            Block::Open(b) => {
                out.extend_from_slice(b.source().as_bytes());
                out.extend_from_slice(b.representative().as_bytes());
                out.extend_from_slice(b.account().as_bytes());
                out.extend_from_slice(b.signature().as_bytes());
                out.extend_from_slice(&b.work().to_le_bytes());
            }
            Block::Change(b) => {
                out.extend_from_slice(b.previous().as_bytes());
                out.extend_from_slice(b.representative().as_bytes());
                out.extend_from_slice(b.signature().as_bytes());
                out.extend_from_slice(&b.work().to_le_bytes());
            }
            Block::State(b) => {
                out.extend_from_slice(b.account().as_bytes());
                out.extend_from_slice(b.previous().as_bytes());
                out.extend_from_slice(b.representative().as_bytes());
                out.extend_from_slice(&b.balance().to_be_bytes());
                out.extend_from_slice(b.link().as_bytes());
                out.extend_from_slice(b.signature().as_bytes());
                out.extend_from_slice(&b.work().to_be_bytes());
            }
        }
    }

    /// Serialized body size, excluding the tag.
    pub fn serialized_size(&self) -> usize {
        match self {
            Block::Send(_) => SendBlock::SIZE,
            Block::Receive(_) => ReceiveBlock::SIZE,
            Block::Open(_) => OpenBlock::SIZE,
            Block::Change(_) => ChangeBlock::SIZE,
            Block::State(_) => StateBlock::SIZE,
        }
    }
}

/// Append the type tag followed by the block body.
pub fn serialize_block_into(block: &Block, out: &mut Vec<u8>) {
    out.reserve(1 + block.serialized_size());
    out.push(block.block_type().as_u8());
    block.serialize(out);
}

/// Type-prefixed serialization of `block`.
pub fn serialize_block(block: &Block) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + block.serialized_size());
    serialize_block_into(block, &mut out);
    out
}

/// Read a type tag and the matching block body from `reader`.
pub fn deserialize_block(reader: &mut ByteReader<'_>) -> Result<Block, DeserializationError> {
    let tag = reader.read_u8()?;
    match BlockType::from_u8(tag) {
        Some(block_type) => deserialize_block_with_type(block_type, reader),
        None => {
            warn!(tag, "Rejected block with unknown type tag");
            Err(DeserializationError::UnknownBlockType(tag))
        }
    }
}

/// Read a block body whose type was transmitted out of band.
pub fn deserialize_block_with_type(
    block_type: BlockType,
    reader: &mut ByteReader<'_>,
) -> Result<Block, DeserializationError> {
    let block = match block_type {
        BlockType::Send => {
            let previous = BlockHash::from_bytes(reader.read_array()?);
            let destination = Account::from_bytes(reader.read_array()?);
            let balance = Amount::from_be_bytes(reader.read_array()?);
            let signature = Signature::from_bytes(reader.read_array()?);
            let work = reader.read_u64_le()?;
            Block::Send(SendBlock::from_parts(
                previous,
                destination,
                balance,
                signature,
                work,
            ))
        }
        BlockType::Receive => {
            let previous = BlockHash::from_bytes(reader.read_array()?);
            let source = BlockHash::from_bytes(reader.read_array()?);
            let signature = Signature::from_bytes(reader.read_array()?);
            let work = reader.read_u64_le()?;
            Block::Receive(ReceiveBlock::from_parts(previous, source, signature, work))
        }
        BlockType::Open => {
            let source = BlockHash::from_bytes(reader.read_array()?);
            let representative = Account::from_bytes(reader.read_array()?);
            let account = Account::from_bytes(reader.read_array()?);
            let signature = Signature::from_bytes(reader.read_array()?);
            let work = reader.read_u64_le()?;
            Block::Open(OpenBlock::from_parts(
                source,
                representative,
                account,
                signature,
                work,
            ))
        }
        BlockType::Change => {
            let previous = BlockHash::from_bytes(reader.read_array()?);
            let representative = Account::from_bytes(reader.read_array()?);
            let signature = Signature::from_bytes(reader.read_array()?);
            let work = reader.read_u64_le()?;
            Block::Change(ChangeBlock::from_parts(previous, representative, signature, work))
        }
        BlockType::State => {
            let account = Account::from_bytes(reader.read_array()?);
            let previous = BlockHash::from_bytes(reader.read_array()?);
            let representative = Account::from_bytes(reader.read_array()?);
            let balance = Amount::from_be_bytes(reader.read_array()?);
            let link = Link::from_bytes(reader.read_array()?);
            let signature = Signature::from_bytes(reader.read_array()?);
            let work = reader.read_u64_be()?;
            Block::State(StateBlock::from_parts(
                account,
                previous,
                representative,
                balance,
                link,
                signature,
                work,
            ))
        }
        BlockType::Invalid | BlockType::NotABlock => {
            return Err(DeserializationError::UnknownBlockType(block_type.as_u8()))
        }
    };
    Ok(block)
}

/// Decode a complete type-prefixed block; trailing bytes are an error.
pub fn block_from_bytes(bytes: &[u8]) -> Result<Block, DeserializationError> {
    let mut reader = ByteReader::new(bytes);
    let block = deserialize_block(&mut reader)?;
    if !reader.is_empty() {
        return Err(DeserializationError::TrailingBytes(reader.remaining()));
    }
    Ok(block)
}
