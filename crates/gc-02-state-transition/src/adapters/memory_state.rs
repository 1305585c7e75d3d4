//! # In-Memory State
//!
//! State service stand-in for tests and local runs. Write-sets are applied
//! under one lock, so readers never see half of a commit.

use crate::domain::effects::WriteSet;
use crate::ports::outbound::{StateReader, StateWriter, StoreError};
use gc_01_address_derivation::StateAddress;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// In-memory key/value state.
#[derive(Debug, Default)]
pub struct InMemoryState {
    entries: RwLock<BTreeMap<StateAddress, Vec<u8>>>,
    unavailable: AtomicBool,
    reject_writes: AtomicBool,
    commits: AtomicU64,
}

impl InMemoryState {
    /// Create a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a value directly, bypassing the engine.
    pub fn put_raw(&self, address: StateAddress, value: Vec<u8>) {
        self.entries.write().insert(address, value);
    }

    /// Read a value directly.
    #[must_use]
    pub fn get_raw(&self, address: &StateAddress) -> Option<Vec<u8>> {
        self.entries.read().get(address).cloned()
    }

    /// Delete a value directly.
    pub fn remove_raw(&self, address: &StateAddress) -> Option<Vec<u8>> {
        self.entries.write().remove(address)
    }

    /// Number of stored addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<StateAddress, Vec<u8>> {
        self.entries.read().clone()
    }

    /// Number of successful `set_state` commits.
    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    /// Make every read and write fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Refuse write-sets while still serving reads.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory state offline".to_string()));
        }
        Ok(())
    }
}

impl StateReader for InMemoryState {
    fn get_state(
        &self,
        addresses: &[StateAddress],
    ) -> Result<BTreeMap<StateAddress, Option<Vec<u8>>>, StoreError> {
        self.check_available()?;
        let entries = self.entries.read();
        Ok(addresses
            .iter()
            .map(|a| (a.clone(), entries.get(a).cloned()))
            .collect())
    }
}

impl StateWriter for InMemoryState {
    fn set_state(&self, write_set: &WriteSet) -> Result<(), StoreError> {
        self.check_available()?;
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(format!(
                "{} entries refused",
                write_set.len()
            )));
        }
        let mut entries = self.entries.write();
        for (address, value) in write_set.iter() {
            entries.insert(address.clone(), value.to_vec());
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
