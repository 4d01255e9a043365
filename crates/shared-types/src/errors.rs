//! # Error Types
//!
//! Errors raised while decoding primitives from text or bytes.

use thiserror::Error;

/// Errors that can occur while parsing a primitive from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Hex input had the wrong number of digits.
    #[error("Invalid hex length: expected {expected} digits, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },

    /// Hex input contained a non-hex character.
    #[error("Invalid hex digit in {0:?}")]
    InvalidHex(String),

    /// Decimal input was not a valid unsigned 128-bit number.
    #[error("Invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    /// Account string did not start with the expected prefix.
    #[error("Account string must start with {expected:?}")]
    InvalidAccountPrefix { expected: &'static str },

    /// Account string body had the wrong number of characters.
    #[error("Invalid account length: expected {expected} characters, got {actual}")]
    InvalidAccountLength { expected: usize, actual: usize },

    /// Account string contained a character outside the encoding alphabet.
    #[error("Invalid account character {0:?}")]
    InvalidAccountCharacter(char),

    /// Account string encodes more than 256 bits of key material.
    #[error("Account string overflows 256 bits")]
    AccountOverflow,

    /// Account checksum does not match the decoded public key.
    #[error("Account checksum mismatch")]
    AccountChecksum,
}

/// Errors raised by [`crate::ByteReader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Fewer bytes remained than the read required.
    #[error("Unexpected end of stream: needed {needed} bytes, {available} available")]
    UnexpectedEnd { needed: usize, available: usize },
}
