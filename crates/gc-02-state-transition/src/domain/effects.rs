//! # Effects
//!
//! What an accepted command produces: an outcome and the write-set to
//! commit as one transaction.

use super::control::PumpStatus;
use gc_01_address_derivation::StateAddress;

/// Ordered key/value writes committed atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSet {
    entries: Vec<(StateAddress, Vec<u8>)>,
}

impl WriteSet {
    /// Empty write-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a write. A later write to the same address replaces the earlier one.
    pub fn insert(&mut self, address: StateAddress, value: Vec<u8>) {
        if let Some(slot) = self.entries.iter_mut().find(|(a, _)| *a == address) {
            slot.1 = value;
        } else {
            self.entries.push((address, value));
        }
    }

    /// Number of addresses written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value written to `address`, if any.
    #[must_use]
    pub fn get(&self, address: &StateAddress) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, v)| v.as_slice())
    }

    /// Addresses in logical write order.
    pub fn addresses(&self) -> impl Iterator<Item = &StateAddress> {
        self.entries.iter().map(|(a, _)| a)
    }

    /// Entries in logical write order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateAddress, &[u8])> {
        self.entries.iter().map(|(a, v)| (a, v.as_slice()))
    }
}

impl IntoIterator for WriteSet {
    type Item = (StateAddress, Vec<u8>);
    type IntoIter = std::vec::IntoIter<(StateAddress, Vec<u8>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Semantic result of an accepted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A new device record was created.
    DeviceRegistered {
        /// Registered device
        device_id: String,
        /// Key now bound to the device
        owner_public_key: String,
    },
    /// A reading was appended and the device snapshot updated.
    TelemetryRecorded {
        /// Reporting device
        device_id: String,
        /// Control decision
        pump_status: PumpStatus,
        /// Where the telemetry record was written
        telemetry_address: StateAddress,
    },
}

/// Outcome plus the writes that realize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effects {
    /// What happened.
    pub outcome: Outcome,
    /// What to persist.
    pub write_set: WriteSet,
}

impl Effects {
    /// Number of keys written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_set.len()
    }

    /// Pump decision, for telemetry outcomes.
    #[must_use]
    pub fn pump_status(&self) -> Option<PumpStatus> {
        match &self.outcome {
            Outcome::TelemetryRecorded { pump_status, .. } => Some(*pump_status),
            Outcome::DeviceRegistered { .. } => None,
        }
    }
}
