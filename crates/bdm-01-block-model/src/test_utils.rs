//! Deterministic keys and blocks shared by tests across the workspace.

use shared_crypto::KeyPair;
use shared_types::{Account, Amount, BlockHash, Link, RawKey};

use crate::domain::{Block, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock, StateBlock};

/// Key pair derived from a seed of 32 copies of `seed`.
pub fn keypair(seed: u8) -> KeyPair {
    KeyPair::from_private(RawKey::from_bytes([seed; 32]))
}

/// Signer of every block returned by [`sample_blocks`].
pub fn sample_key() -> KeyPair {
    keypair(3)
}

/// One block of each variant, in tag order, with arbitrary but distinct
/// field values. The blocks do not form a valid chain.
pub fn sample_blocks() -> Vec<Block> {
    let key = sample_key();
    let prv = key.private_key();
    let owner = key.account();
    let rep = Account::from_bytes([0x22; 32]);

    vec![
        Block::from(SendBlock::new(
            BlockHash::from_bytes([0x01; 32]),
            Account::from_bytes([0x02; 32]),
            Amount::raw(0x0102_0304),
            prv,
            &owner,
            0x0011_2233_4455_6677,
        )),
        Block::from(ReceiveBlock::new(
            BlockHash::from_bytes([0x03; 32]),
            BlockHash::from_bytes([0x04; 32]),
            prv,
            &owner,
            7,
        )),
        Block::from(OpenBlock::new(
            BlockHash::from_bytes([0x05; 32]),
            rep,
            owner,
            prv,
            &owner,
            8,
        )),
        Block::from(ChangeBlock::new(
            BlockHash::from_bytes([0x06; 32]),
            rep,
            prv,
            &owner,
            9,
        )),
        Block::from(StateBlock::new(
            owner,
            BlockHash::from_bytes([0x07; 32]),
            rep,
            Amount::raw(u128::MAX - 1),
            Link::from(Account::from_bytes([0x08; 32])),
            prv,
            &owner,
            0x0102_0304_0506_0708,
        )),
    ]
}
