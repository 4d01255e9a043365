//! # Block Model (bdm-01)
//!
//! The five immutable block variants of an account chain and their codecs.
//!
//! ## Variants
//!
//! | Variant | Hashable fields | Predecessor |
//! |---------|-----------------|-------------|
//! | `send` | previous, destination, balance | `previous` |
//! | `receive` | previous, source | `previous` |
//! | `open` | source, representative, account | none (chain root) |
//! | `change` | previous, representative | `previous` |
//! | `state` | preamble, account, previous, representative, balance, link | `previous` (zero when opening) |
//!
//! ## Crate Structure
//!
//! - `domain/` - Block variants, the `Block` sum type, type tags, errors
//! - `codec/` - Type-prefixed binary encoding and JSON encoding
//! - `test_utils` - Deterministic keys and sample blocks
//!
//! ## Usage
//!
//! ```ignore
//! use bdm_01_block_model::{block_from_bytes, serialize_block, Block};
//!
//! let bytes = serialize_block(&block);
//! let decoded = block_from_bytes(&bytes)?;
//! assert_eq!(decoded.hash(), block.hash());
//! ```

pub mod codec;
pub mod domain;
pub mod test_utils;

pub use codec::*;
pub use domain::*;
