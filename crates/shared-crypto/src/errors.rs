//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Public key bytes are not a valid curve point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Private key text could not be decoded
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}
