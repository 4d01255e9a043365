use shared_types::StreamError;
use thiserror::Error;

/// Rejection of a block (or a message carrying one) at the decoding boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializationError {
    #[error("Truncated input: {0}")]
    Truncated(#[from] StreamError),

    #[error("Unknown block type tag: {0}")]
    UnknownBlockType(u8),

    #[error("Unexpected {0} trailing bytes after block")]
    TrailingBytes(usize),

    #[error("Malformed JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
