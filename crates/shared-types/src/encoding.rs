//! # Account String Codec
//!
//! Accounts are shown to users as `bdm_` followed by 60 base-32 characters.
//! The 300 encoded bits are, most significant first:
//!
//! ```text
//! [4 zero bits][256-bit public key][40-bit checksum]
//! ```
//!
//! The checksum is the 5-byte BLAKE2b digest of the public key, read as a
//! little-endian integer, so its bytes appear reversed in the encoding.

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};

use crate::errors::EncodingError;

pub const ACCOUNT_PREFIX: &str = "bdm_";

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";
const ENCODED_CHARS: usize = 60;
const ENCODED_BITS: usize = ENCODED_CHARS * 5;
const PAD_BITS: usize = 4;

fn checksum(public_key: &[u8; 32]) -> [u8; 5] {
    let mut hasher = Blake2b::<U5>::new();
    hasher.update(public_key);
    hasher.finalize().into()
}

/// Key bytes followed by the reversed checksum: the low 296 of the 300 bits.
fn payload(public_key: &[u8; 32]) -> [u8; 37] {
    let mut out = [0u8; 37];
    out[..32].copy_from_slice(public_key);
    let mut check = checksum(public_key);
    check.reverse();
    out[32..].copy_from_slice(&check);
    out
}

fn payload_bit(payload: &[u8; 37], bit: usize) -> u8 {
    if bit < PAD_BITS {
        return 0;
    }
    let index = bit - PAD_BITS;
    (payload[index / 8] >> (7 - index % 8)) & 1
}

pub fn encode_account(public_key: &[u8; 32]) -> String {
    let payload = payload(public_key);
    let mut out = String::with_capacity(ACCOUNT_PREFIX.len() + ENCODED_CHARS);
    out.push_str(ACCOUNT_PREFIX);
    for chunk in 0..ENCODED_CHARS {
        let value = (0..5).fold(0u8, |acc, i| (acc << 1) | payload_bit(&payload, chunk * 5 + i));
        out.push(ALPHABET[value as usize] as char);
    }
    out
}

pub fn decode_account(text: &str) -> Result<[u8; 32], EncodingError> {
    let body = text
        .strip_prefix(ACCOUNT_PREFIX)
        .ok_or(EncodingError::InvalidAccountPrefix {
            expected: ACCOUNT_PREFIX,
        })?;
    if body.chars().count() != ENCODED_CHARS {
        return Err(EncodingError::InvalidAccountLength {
            expected: ENCODED_CHARS,
            actual: body.chars().count(),
        });
    }

    let mut bits = [0u8; ENCODED_BITS];
    for (chunk, c) in body.chars().enumerate() {
        let value = ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(EncodingError::InvalidAccountCharacter(c))?;
        for i in 0..5 {
            bits[chunk * 5 + i] = ((value >> (4 - i)) & 1) as u8;
        }
    }
    if bits[..PAD_BITS].iter().any(|&b| b != 0) {
        return Err(EncodingError::AccountOverflow);
    }

    let mut decoded = [0u8; 37];
    for (index, bit) in bits[PAD_BITS..].iter().enumerate() {
        decoded[index / 8] |= bit << (7 - index % 8);
    }

    let mut public_key = [0u8; 32];
    public_key.copy_from_slice(&decoded[..32]);
    if payload(&public_key) != decoded {
        return Err(EncodingError::AccountChecksum);
    }
    Ok(public_key)
}
