//! # Address Lock Table
//!
//! Serializes commands that touch the same device address. Registration
//! and owner checks read then write one address, so two of them for the
//! same device must not interleave. Commands for different devices take
//! different locks and run in parallel.

use gc_01_address_derivation::StateAddress;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::collections::HashMap;
use std::sync::Arc;

/// Idle entries are swept once the table grows past this size.
const PRUNE_THRESHOLD: usize = 1024;

/// Held while a command for one address runs.
pub struct AddressGuard {
    _guard: ArcMutexGuard<RawMutex, ()>,
}

/// One mutex per address, created on demand.
#[derive(Debug, Default)]
pub struct AddressLockTable {
    locks: Mutex<HashMap<StateAddress, Arc<Mutex<()>>>>,
}

impl AddressLockTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `address` is free, then hold it until the guard drops.
    pub fn lock(&self, address: &StateAddress) -> AddressGuard {
        let slot = {
            let mut locks = self.locks.lock();
            if locks.len() > PRUNE_THRESHOLD {
                Self::prune(&mut locks);
            }
            Arc::clone(locks.entry(address.clone()).or_default())
        };
        AddressGuard {
            _guard: slot.lock_arc(),
        }
    }

    /// Number of addresses with a lock entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// True if no entries exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }

    /// Drop entries nobody holds or waits on.
    pub fn prune_idle(&self) {
        Self::prune(&mut self.locks.lock());
    }

    fn prune(locks: &mut HashMap<StateAddress, Arc<Mutex<()>>>) {
        locks.retain(|_, slot| Arc::strong_count(slot) > 1);
    }
}
