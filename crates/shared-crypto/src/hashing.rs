//! # BLAKE2b Hashing
//!
//! Every content address in the ledger is a 256-bit BLAKE2b digest.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// BLAKE2b output truncated by parameter (not by slicing) to 256 bits.
pub type Hash = [u8; 32];

/// Stateful BLAKE2b-256 hasher.
pub struct Blake2b256Hasher {
    inner: Blake2b<U32>,
}

impl Blake2b256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Blake2b::<U32>::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.inner.update(data.as_ref());
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

impl Default for Blake2b256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash the concatenation of `inputs`.
pub fn blake2b_256(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Blake2b256Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}
