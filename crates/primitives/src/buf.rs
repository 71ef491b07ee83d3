//! Fixed-width byte buffers used as identifiers throughout the bridge.
//!
//! Every identifier in the protocol (header ids, source transaction ids, Merkle roots, circuit
//! ids, transfer ids) is a 32-byte hash commitment. Wrapping them in a dedicated type keeps the
//! hex rendering and the size validation in one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of a [`Buf32`] in bytes.
pub const BUF32_SIZE: usize = 32;

/// A 32-byte buffer, typically holding a hash-derived identifier.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Buf32(#[serde(with = "hex::serde")] [u8; BUF32_SIZE]);

impl Buf32 {
    /// The all-zero buffer.
    ///
    /// Used as a sentinel for "no value" in contexts where an identifier is structurally
    /// required, e.g. the parent of the genesis header.
    pub const ZERO: Buf32 = Buf32([0u8; BUF32_SIZE]);

    /// Creates a new buffer from a byte array.
    pub const fn new(bytes: [u8; BUF32_SIZE]) -> Self {
        Buf32(bytes)
    }

    /// Returns the buffer as a byte array reference.
    pub const fn as_bytes(&self) -> &[u8; BUF32_SIZE] {
        &self.0
    }

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

/// Errors that can occur when constructing a [`Buf32`] from untyped bytes.
#[derive(Debug, Clone, Error)]
pub enum Buf32Error {
    /// The input slice does not hold exactly [`BUF32_SIZE`] bytes.
    #[error("expected {BUF32_SIZE} bytes, got {0}")]
    InvalidSize(usize),
}

impl From<[u8; BUF32_SIZE]> for Buf32 {
    fn from(bytes: [u8; BUF32_SIZE]) -> Self {
        Buf32(bytes)
    }
}

impl From<Buf32> for [u8; BUF32_SIZE] {
    fn from(buf: Buf32) -> Self {
        buf.0
    }
}

impl TryFrom<&[u8]> for Buf32 {
    type Error = Buf32Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; BUF32_SIZE] = bytes
            .try_into()
            .map_err(|_| Buf32Error::InvalidSize(bytes.len()))?;
        Ok(Buf32(array))
    }
}

impl AsRef<[u8]> for Buf32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Buf32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// Identifiers are only ever useful in hex form, so `{:?}` and `{}` render identically.
impl std::fmt::Debug for Buf32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert!(Buf32::ZERO.is_zero());
        assert!(!Buf32::new([1u8; 32]).is_zero());
    }

    #[test]
    fn try_from_slice() {
        let bytes = [7u8; 32];
        let buf = Buf32::try_from(&bytes[..]).unwrap();
        assert_eq!(buf.as_bytes(), &bytes);

        assert!(matches!(
            Buf32::try_from(&bytes[..31]),
            Err(Buf32Error::InvalidSize(31))
        ));
    }

    #[test]
    fn hex_display() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let buf = Buf32::new(bytes);
        let rendered = buf.to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with("ab"));
        assert!(rendered.ends_with("01"));
    }

    #[test]
    fn serde_round_trip_as_hex() {
        let buf = Buf32::new([0x5a; 32]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{buf}\""));
        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
    }
}
