use bdm_01_block_model::DeserializationError;
use shared_types::StreamError;
use thiserror::Error;

/// Vote decoding and verification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("Truncated vote header: {0}")]
    Truncated(#[from] StreamError),

    #[error("Invalid voted block: {0}")]
    InvalidBlock(#[from] DeserializationError),

    #[error("Unexpected {0} trailing bytes after vote")]
    TrailingBytes(usize),

    #[error("Vote signature does not match voter")]
    InvalidSignature,
}
