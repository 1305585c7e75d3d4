//! # Driven Ports (SPI - Outbound)
//!
//! The shared ledger state service, seen from the engine. Adapters translate
//! these calls into whatever request/response channel the validator offers.
//!
//! The engine reads once, plans, then hands the complete write-set to a
//! single `set_state` call. Implementations must commit that write-set
//! atomically: all entries or none.

use crate::domain::effects::WriteSet;
use gc_01_address_derivation::StateAddress;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failures at the store boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The state service cannot be reached.
    #[error("state service unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete in time.
    #[error("state request timed out")]
    Timeout,

    /// The write-set was refused as a whole.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Read side of the state service.
pub trait StateReader: Send + Sync {
    /// Current values for `addresses`. Every requested address appears in
    /// the result; `None` means nothing is stored there.
    fn get_state(
        &self,
        addresses: &[StateAddress],
    ) -> Result<BTreeMap<StateAddress, Option<Vec<u8>>>, StoreError>;

    /// Value at one address. Empty values read as absent.
    fn get_one(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, StoreError> {
        let mut values = self.get_state(std::slice::from_ref(address))?;
        Ok(values
            .remove(address)
            .flatten()
            .filter(|bytes| !bytes.is_empty()))
    }
}

/// Write side of the state service.
pub trait StateWriter: Send + Sync {
    /// Commit every entry of `write_set`, or none of them.
    fn set_state(&self, write_set: &WriteSet) -> Result<(), StoreError>;
}

/// A store that can both read and write, as handed to a transaction handler.
pub trait StateContext: StateReader + StateWriter {}

impl<T: StateReader + StateWriter + ?Sized> StateContext for T {}
