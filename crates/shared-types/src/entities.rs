//! # Core Primitive Entities
//!
//! Fixed-width value types the ledger is built from.
//!
//! ## Clusters
//!
//! - **Identity**: `Account` (Ed25519 public key), `RawKey` (private key)
//! - **Content addressing**: `BlockHash`, `Link`
//! - **Value**: `Amount` (128-bit raw units)
//! - **Authentication**: `Signature`

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{decode_account, encode_account};
use crate::errors::EncodingError;

/// Decode exactly `N` bytes from a hex string (either case).
pub fn decode_hex_array<const N: usize>(text: &str) -> Result<[u8; N], EncodingError> {
    if text.len() != N * 2 {
        return Err(EncodingError::InvalidHexLength {
            expected: N * 2,
            actual: text.len(),
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(text, &mut out).map_err(|_| EncodingError::InvalidHex(text.to_string()))?;
    Ok(out)
}

macro_rules! bytes32_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub const fn zero() -> Self {
                Self([0u8; 32])
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Uppercase, 64 hex digits.
            pub fn encode_hex(&self) -> String {
                hex::encode_upper(self.0)
            }

            pub fn decode_hex(text: &str) -> Result<Self, EncodingError> {
                decode_hex_array(text).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.encode_hex())
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

bytes32_type!(
    /// Content address of a block: BLAKE2b-256 over its hashable fields.
    BlockHash
);

bytes32_type!(
    /// An account, identified by its Ed25519 public key.
    Account
);

bytes32_type!(
    /// Polymorphic 32-byte field of a state block.
    ///
    /// Holds the source block hash on receive/open, the destination account
    /// on send, and zero on a representative change.
    Link
);

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_account())
    }
}

impl Account {
    /// Render as a `bdm_` account string.
    pub fn encode_account(&self) -> String {
        encode_account(&self.0)
    }

    /// Parse a `bdm_` account string, verifying its checksum.
    pub fn decode_account(text: &str) -> Result<Self, EncodingError> {
        decode_account(text).map(Self)
    }
}

impl Link {
    pub fn as_account(&self) -> Account {
        Account(self.0)
    }

    pub fn as_block_hash(&self) -> BlockHash {
        BlockHash(self.0)
    }
}

impl From<Account> for Link {
    fn from(account: Account) -> Self {
        Link(account.0)
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Link(hash.0)
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BlockHash::decode_hex(&text).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_hex())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Link::decode_hex(&text).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_account())
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Account::decode_account(&text).map_err(serde::de::Error::custom)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Uppercase, 128 hex digits.
    pub fn encode_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn decode_hex(text: &str) -> Result<Self, EncodingError> {
        decode_hex_array(text).map(Self)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 64])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.encode_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Signature::decode_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// An amount in raw units. The entire supply is `u128::MAX`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u128::MAX);

    pub const fn raw(value: u128) -> Self {
        Self(value)
    }

    pub const fn number(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Larger minus smaller; never underflows.
    pub fn abs_diff(self, other: Amount) -> Amount {
        Amount(self.0.abs_diff(other.0))
    }

    pub fn wrapping_add(self, other: Amount) -> Amount {
        Amount(self.0.wrapping_add(other.0))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Uppercase, 32 hex digits.
    pub fn encode_hex(&self) -> String {
        hex::encode_upper(self.to_be_bytes())
    }

    pub fn decode_hex(text: &str) -> Result<Self, EncodingError> {
        decode_hex_array(text).map(Self::from_be_bytes)
    }

    pub fn decode_dec(text: &str) -> Result<Self, EncodingError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidDecimal(text.to_string()));
        }
        text.parse::<u128>()
            .map(Amount)
            .map_err(|_| EncodingError::InvalidDecimal(text.to_string()))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

/// A 32-byte Ed25519 private key seed. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RawKey([u8; 32]);

impl RawKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn decode_hex(text: &str) -> Result<Self, EncodingError> {
        decode_hex_array(text).map(Self)
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawKey(<redacted>)")
    }
}
