//! # Block Variants
//!
//! Every block is identified by the BLAKE2b-256 digest of its hashable
//! fields. The signature and proof-of-work nonce travel with the block but
//! are not part of its identity.
//!
//! Fields are private: a block is never mutated after construction, so its
//! hash is stable for its whole lifetime.

use shared_crypto::{sign_message, validate_message, Blake2b256Hasher, CryptoError};
use shared_types::{Account, Amount, BlockHash, Link, RawKey, Signature};

use super::block_type::BlockType;

/// Legacy send: moves value out of the chain. `balance` is the balance
/// remaining after the send, not the amount sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBlock {
    previous: BlockHash,
    destination: Account,
    balance: Amount,
    signature: Signature,
    work: u64,
}

impl SendBlock {
    /// Serialized body size in bytes.
    pub const SIZE: usize = 32 + 32 + 16 + 64 + 8;

    pub fn new(
        previous: BlockHash,
        destination: Account,
        balance: Amount,
        prv: &RawKey,
        public: &Account,
        work: u64,
    ) -> Self {
        let mut block = Self::from_parts(previous, destination, balance, Signature::default(), work);
        block.signature = sign_message(prv, public, block.hash().as_bytes());
        block
    }

    pub fn from_parts(
        previous: BlockHash,
        destination: Account,
        balance: Amount,
        signature: Signature,
        work: u64,
    ) -> Self {
        Self {
            previous,
            destination,
            balance,
            signature,
            work,
        }
    }

    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher
            .update(self.previous)
            .update(self.destination)
            .update(self.balance.to_be_bytes());
        BlockHash::from_bytes(hasher.finalize())
    }

    pub fn previous(&self) -> BlockHash {
        self.previous
    }

    pub fn destination(&self) -> Account {
        self.destination
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn work(&self) -> u64 {
        self.work
    }
}

/// Legacy receive: claims the pending entry created by `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveBlock {
    previous: BlockHash,
    source: BlockHash,
    signature: Signature,
    work: u64,
}

impl ReceiveBlock {
    pub const SIZE: usize = 32 + 32 + 64 + 8;

    pub fn new(
        previous: BlockHash,
        source: BlockHash,
        prv: &RawKey,
        public: &Account,
        work: u64,
    ) -> Self {
        let mut block = Self::from_parts(previous, source, Signature::default(), work);
        block.signature = sign_message(prv, public, block.hash().as_bytes());
        block
    }

    pub fn from_parts(previous: BlockHash, source: BlockHash, signature: Signature, work: u64) -> Self {
        Self {
            previous,
            source,
            signature,
            work,
        }
    }

    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher.update(self.previous).update(self.source);
        BlockHash::from_bytes(hasher.finalize())
    }

    pub fn previous(&self) -> BlockHash {
        self.previous
    }

    pub fn source(&self) -> BlockHash {
        self.source
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn work(&self) -> u64 {
        self.work
    }
}

/// Legacy open: first block of an account chain. Has no predecessor.
///
/// For the genesis block `source` holds the genesis account rather than a
/// block hash; there is no send that funded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    source: BlockHash,
    representative: Account,
    account: Account,
    signature: Signature,
    work: u64,
}

impl OpenBlock {
    pub const SIZE: usize = 32 + 32 + 32 + 64 + 8;

    pub fn new(
        source: BlockHash,
        representative: Account,
        account: Account,
        prv: &RawKey,
        public: &Account,
        work: u64,
    ) -> Self {
        let mut block =
            Self::from_parts(source, representative, account, Signature::default(), work);
        block.signature = sign_message(prv, public, block.hash().as_bytes());
        block
    }

    pub fn from_parts(
        source: BlockHash,
        representative: Account,
        account: Account,
        signature: Signature,
        work: u64,
    ) -> Self {
        Self {
            source,
            representative,
            account,
            signature,
            work,
        }
    }

    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher
            .update(self.source)
            .update(self.representative)
            .update(self.account);
        BlockHash::from_bytes(hasher.finalize())
    }

    pub fn source(&self) -> BlockHash {
        self.source
    }

    pub fn representative(&self) -> Account {
        self.representative
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn work(&self) -> u64 {
        self.work
    }
}

/// Legacy representative change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBlock {
    previous: BlockHash,
    representative: Account,
    signature: Signature,
    work: u64,
}

impl ChangeBlock {
    pub const SIZE: usize = 32 + 32 + 64 + 8;

    pub fn new(
        previous: BlockHash,
        representative: Account,
        prv: &RawKey,
        public: &Account,
        work: u64,
    ) -> Self {
        let mut block = Self::from_parts(previous, representative, Signature::default(), work);
        block.signature = sign_message(prv, public, block.hash().as_bytes());
        block
    }

    pub fn from_parts(
        previous: BlockHash,
        representative: Account,
        signature: Signature,
        work: u64,
    ) -> Self {
        Self {
            previous,
            representative,
            signature,
            work,
        }
    }

    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher.update(self.previous).update(self.representative);
        BlockHash::from_bytes(hasher.finalize())
    }

    pub fn previous(&self) -> BlockHash {
        self.previous
    }

    pub fn representative(&self) -> Account {
        self.representative
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn work(&self) -> u64 {
        self.work
    }
}

/// Universal block: carries the full account state after the block.
///
/// `link` is the source hash when receiving (or opening), the destination
/// account when sending, and zero for a pure representative change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBlock {
    account: Account,
    previous: BlockHash,
    representative: Account,
    balance: Amount,
    link: Link,
    signature: Signature,
    work: u64,
}

impl StateBlock {
    pub const SIZE: usize = 32 + 32 + 32 + 16 + 32 + 64 + 8;

    /// Hash prefix keeping state hashes disjoint from legacy block hashes.
    pub fn preamble() -> [u8; 32] {
        let mut preamble = [0u8; 32];
        preamble[31] = BlockType::State.as_u8();
        preamble
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account: Account,
        previous: BlockHash,
        representative: Account,
        balance: Amount,
        link: Link,
        prv: &RawKey,
        public: &Account,
        work: u64,
    ) -> Self {
        let mut block = Self::from_parts(
            account,
            previous,
            representative,
            balance,
            link,
            Signature::default(),
            work,
        );
        block.signature = sign_message(prv, public, block.hash().as_bytes());
        block
    }

    pub fn from_parts(
        account: Account,
        previous: BlockHash,
        representative: Account,
        balance: Amount,
        link: Link,
        signature: Signature,
        work: u64,
    ) -> Self {
        Self {
            account,
            previous,
            representative,
            balance,
            link,
            signature,
            work,
        }
    }

    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake2b256Hasher::new();
        hasher
            .update(Self::preamble())
            .update(self.account)
            .update(self.previous)
            .update(self.representative)
            .update(self.balance.to_be_bytes())
            .update(self.link);
        BlockHash::from_bytes(hasher.finalize())
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn previous(&self) -> BlockHash {
        self.previous
    }

    pub fn representative(&self) -> Account {
        self.representative
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn link(&self) -> Link {
        self.link
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn work(&self) -> u64 {
        self.work
    }
}

/// A block of any variant.
///
/// Equality is structural. Two blocks with the same hash are treated as the
/// same block; a hash collision is not handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Send(SendBlock),
    Receive(ReceiveBlock),
    Open(OpenBlock),
    Change(ChangeBlock),
    State(StateBlock),
}

impl Block {
    pub fn hash(&self) -> BlockHash {
        match self {
            Block::Send(b) => b.hash(),
            Block::Receive(b) => b.hash(),
            Block::Open(b) => b.hash(),
            Block::Change(b) => b.hash(),
            Block::State(b) => b.hash(),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Send(_) => BlockType::Send,
            Block::Receive(_) => BlockType::Receive,
            Block::Open(_) => BlockType::Open,
            Block::Change(_) => BlockType::Change,
            Block::State(_) => BlockType::State,
        }
    }

    /// Predecessor hash; zero for open blocks and for state blocks that open
    /// their account.
    pub fn previous(&self) -> BlockHash {
        match self {
            Block::Send(b) => b.previous(),
            Block::Receive(b) => b.previous(),
            Block::Open(_) => BlockHash::zero(),
            Block::Change(b) => b.previous(),
            Block::State(b) => b.previous(),
        }
    }

    /// The position a block occupies in its chain. Competing blocks with the
    /// same root are a fork.
    pub fn root(&self) -> BlockHash {
        match self {
            Block::Open(b) => BlockHash::from_bytes(*b.account().as_bytes()),
            Block::State(b) if b.previous().is_zero() => {
                BlockHash::from_bytes(*b.account().as_bytes())
            }
            other => other.previous(),
        }
    }

    pub fn representative(&self) -> Option<Account> {
        match self {
            Block::Open(b) => Some(b.representative()),
            Block::Change(b) => Some(b.representative()),
            Block::State(b) => Some(b.representative()),
            Block::Send(_) | Block::Receive(_) => None,
        }
    }

    pub fn source(&self) -> Option<BlockHash> {
        match self {
            Block::Receive(b) => Some(b.source()),
            Block::Open(b) => Some(b.source()),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<Link> {
        match self {
            Block::State(b) => Some(b.link()),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<Account> {
        match self {
            Block::Send(b) => Some(b.destination()),
            _ => None,
        }
    }

    /// Absolute balance carried by send and state blocks.
    pub fn balance(&self) -> Option<Amount> {
        match self {
            Block::Send(b) => Some(b.balance()),
            Block::State(b) => Some(b.balance()),
            _ => None,
        }
    }

    /// Owning account, for the variants that carry it.
    pub fn account(&self) -> Option<Account> {
        match self {
            Block::Open(b) => Some(b.account()),
            Block::State(b) => Some(b.account()),
            _ => None,
        }
    }

    pub fn signature(&self) -> Signature {
        match self {
            Block::Send(b) => b.signature(),
            Block::Receive(b) => b.signature(),
            Block::Open(b) => b.signature(),
            Block::Change(b) => b.signature(),
            Block::State(b) => b.signature(),
        }
    }

    pub fn work(&self) -> u64 {
        match self {
            Block::Send(b) => b.work(),
            Block::Receive(b) => b.work(),
            Block::Open(b) => b.work(),
            Block::Change(b) => b.work(),
            Block::State(b) => b.work(),
        }
    }

    /// Check the block signature against the chain owner's key.
    pub fn verify_signature(&self, owner: &Account) -> Result<(), CryptoError> {
        validate_message(owner, self.hash().as_bytes(), &self.signature())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Block {
                fn from(block: $ty) -> Self {
                    Block::$variant(block)
                }
            }
        )*
    };
}

impl_from_variant! {
    Send => SendBlock,
    Receive => ReceiveBlock,
    Open => OpenBlock,
    Change => ChangeBlock,
    State => StateBlock,
}
