//! # Value Objects
//!
//! `StateAddress` is the only key type the state store accepts from this family.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Total address length in hex characters.
pub const ADDRESS_LENGTH: usize = 70;

/// Namespace prefix length in hex characters.
pub const PREFIX_LENGTH: usize = 6;

/// Errors raised when parsing an address that did not come from the deriver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Wrong number of characters.
    #[error("invalid address length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Contains something other than lowercase hex.
    #[error("invalid address character {0:?}")]
    InvalidCharacter(char),
}

/// A 70-character lowercase hex state address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateAddress(String);

impl StateAddress {
    /// Wrap a string produced by the deriver. Caller guarantees the format.
    pub(crate) fn from_derived(raw: String) -> Self {
        debug_assert_eq!(raw.len(), ADDRESS_LENGTH);
        Self(raw)
    }

    /// Parse an address supplied by an external collaborator.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if raw.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: raw.len(),
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(AddressError::InvalidCharacter(bad));
        }
        Ok(Self(raw.to_string()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6-character namespace prefix of this address.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LENGTH]
    }

    /// Returns true if this address lives under `namespace`.
    #[must_use]
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.0.starts_with(namespace)
    }
}

impl fmt::Debug for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateAddress({})", self.0)
    }
}

impl fmt::Display for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateAddress {
    type Error = AddressError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<StateAddress> for String {
    fn from(addr: StateAddress) -> Self {
        addr.0
    }
}
