//! # Shared Crypto
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE2b-256 | Block hashes, vote hashes |
//! | `signatures` | Ed25519 with BLAKE2b-512 | Block and vote signing |
//!
//! ## Security Properties
//!
//! - **Ed25519**: deterministic nonces, no RNG dependency when signing
//! - **BLAKE2b** replaces SHA-512 inside Ed25519 for key expansion and both
//!   signing transcripts; keys and signatures are NOT interchangeable with
//!   standard RFC 8032 Ed25519.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake2b_256, Blake2b256Hasher};
pub use signatures::{sign_message, validate_message, KeyPair};
