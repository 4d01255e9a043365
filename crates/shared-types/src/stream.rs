//! # Byte Stream Reader
//!
//! Cursor over a borrowed byte slice used by every fixed-layout decoder.
//! Reads never panic: running past the end yields [`StreamError::UnexpectedEnd`].

use crate::errors::StreamError;

/// Forward-only reader over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read exactly `len` bytes, borrowing from the underlying slice.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], StreamError> {
        if self.remaining() < len {
            return Err(StreamError::UnexpectedEnd {
                needed: len,
                available: self.remaining(),
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    pub fn read_u8(&mut self) -> Result<u8, StreamError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u64_le(&mut self) -> Result<u64, StreamError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_be(&mut self) -> Result<u64, StreamError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Peek at the unread tail without consuming it.
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}
