//! The double-SHA-256 commitment primitive.
//!
//! Applying the hash twice separates these commitments from plain SHA-256 uses and closes off
//! length-extension-style reuse of intermediate states. All identifier derivations in the bridge
//! go through this module.

use sha2::{Digest, Sha256};

use crate::buf::Buf32;

/// Computes `SHA-256(SHA-256(data))`.
pub fn sha256d(data: &[u8]) -> Buf32 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Buf32::new(second.into())
}

/// Incremental double-SHA-256 over a sequence of length-prefixed fields.
///
/// Multi-field derivations (transfer ids, proof record ids) must not be ambiguous under field
/// concatenation, so every field is prefixed with its length as a little-endian `u64` before
/// being absorbed.
#[derive(Debug, Default)]
pub struct Sha256d {
    inner: Sha256,
}

impl Sha256d {
    /// Creates a fresh hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs a variable-length field, prefixed with its length.
    pub fn absorb(&mut self, field: &[u8]) {
        self.inner.update((field.len() as u64).to_le_bytes());
        self.inner.update(field);
    }

    /// Absorbs a `u64` field in little-endian encoding.
    pub fn absorb_u64(&mut self, value: u64) {
        self.absorb(&value.to_le_bytes());
    }

    /// Absorbs a `u128` field in little-endian encoding.
    pub fn absorb_u128(&mut self, value: u128) {
        self.absorb(&value.to_le_bytes());
    }

    /// Finishes the first hash pass and applies the second.
    pub fn finalize(self) -> Buf32 {
        let first = self.inner.finalize();
        Buf32::new(Sha256::digest(first).into())
    }
}
