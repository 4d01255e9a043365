//! # Shared Types Crate
//!
//! Fixed-width primitives used by every ledger crate.
//!
//! ## Design Principles
//!
//! - **Newtypes, not aliases**: a `BlockHash` and an `Account` are both 32
//!   bytes, but they are never interchangeable without an explicit conversion.
//! - **Big-endian on the wire**: hash, account and amount bytes are stored in
//!   network order so that byte-wise ordering matches numeric ordering.
//! - **Text forms are canonical**: hashes and signatures print as uppercase
//!   hex, accounts print as `bdm_` account strings.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod stream;

pub use encoding::{decode_account, encode_account, ACCOUNT_PREFIX};
pub use entities::*;
pub use errors::*;
pub use stream::ByteReader;
