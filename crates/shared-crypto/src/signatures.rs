//! # Ed25519 Signatures over BLAKE2b
//!
//! Twisted Edwards curve signatures where BLAKE2b-512 takes the place of
//! SHA-512 both when expanding the private seed and when hashing the signing
//! transcripts.
//!
//! ## Security Properties
//!
//! - No RNG dependency (deterministic nonce from the expanded key and message)
//! - Private seeds are held in [`RawKey`], which is zeroised on drop

use blake2::{Blake2b512, Digest};
use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::VerifyingKey;
use rand::RngCore;
use shared_types::{Account, RawKey, Signature};
use zeroize::Zeroize;

use crate::CryptoError;

fn expand(prv: &RawKey) -> ExpandedSecretKey {
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&Blake2b512::digest(prv.as_bytes()));
    let expanded = ExpandedSecretKey::from_bytes(&digest);
    digest.zeroize();
    expanded
}

/// Sign `message` with the private seed `prv` whose public key is `public`.
pub fn sign_message(prv: &RawKey, public: &Account, message: &[u8]) -> Signature {
    let expanded = expand(prv);
    let verifying_key = match VerifyingKey::from_bytes(public.as_bytes()) {
        Ok(key) => key,
        // A caller-supplied public key that is not a point cannot be the
        // key for `prv`; derive the real one instead of signing garbage.
        Err(_) => VerifyingKey::from(&expanded),
    };
    let signature = raw_sign::<Blake2b512>(&expanded, message, &verifying_key);
    Signature::from_bytes(signature.to_bytes())
}

/// Check that `signature` over `message` was produced by `public`.
pub fn validate_message(
    public: &Account,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    raw_verify::<Blake2b512>(&verifying_key, message, &signature)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Ed25519 keypair whose public key is an [`Account`].
#[derive(Clone)]
pub struct KeyPair {
    prv: RawKey,
    public: Account,
}

impl KeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        let pair = Self::from_private(RawKey::from_bytes(seed));
        seed.zeroize();
        pair
    }

    /// Derive the public key from a private seed.
    pub fn from_private(prv: RawKey) -> Self {
        let public = Account::from_bytes(VerifyingKey::from(&expand(&prv)).to_bytes());
        Self { prv, public }
    }

    /// Create from a 64-digit hex private seed.
    pub fn from_private_hex(text: &str) -> Result<Self, CryptoError> {
        let prv = RawKey::decode_hex(text).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_private(prv))
    }

    /// The account (public key).
    pub fn account(&self) -> Account {
        self.public
    }

    /// The private seed.
    pub fn private_key(&self) -> &RawKey {
        &self.prv
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Signature {
        sign_message(&self.prv, &self.public, message)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("account", &self.public)
            .finish_non_exhaustive()
    }
}
