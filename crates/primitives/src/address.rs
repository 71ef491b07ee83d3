//! Opaque chain addresses.
//!
//! The bridge core never interprets address contents; it only requires them to be syntactically
//! sane. Encoding rules belong to the chains on either side of the bridge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted address length in bytes.
pub const MAX_ADDRESS_LEN: usize = 128;

/// A syntactically validated, otherwise opaque chain address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Errors that can occur when constructing an [`Address`].
#[derive(Debug, Clone, Error)]
pub enum AddressError {
    /// The address string is empty.
    #[error("address must not be empty")]
    Empty,

    /// The address string exceeds [`MAX_ADDRESS_LEN`] bytes.
    #[error("address is {0} bytes, exceeding the {MAX_ADDRESS_LEN} byte limit")]
    TooLong(usize),

    /// The address contains a byte outside the printable ASCII range.
    #[error("address contains non-printable byte {0:#04x}")]
    Unprintable(u8),
}

impl Address {
    /// Validates and wraps an address string.
    pub fn new(addr: impl Into<String>) -> Result<Self, AddressError> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(AddressError::Empty);
        }
        if addr.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::TooLong(addr.len()));
        }
        if let Some(&byte) = addr.as_bytes().iter().find(|b| !b.is_ascii_graphic()) {
            return Err(AddressError::Unprintable(byte));
        }
        Ok(Address(addr))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(addr: String) -> Result<Self, Self::Error> {
        Address::new(addr)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
