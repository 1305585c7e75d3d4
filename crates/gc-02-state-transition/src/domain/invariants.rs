//! # Domain Invariants
//!
//! Business rules checked before any write is planned. Each returns the
//! typed rejection the engine surfaces unchanged.

use super::entities::DeviceRecord;
use super::errors::EngineError;
use super::effects::WriteSet;
use gc_01_address_derivation::AddressDeriver;

/// Invariant: identifiers that feed address derivation are non-empty.
pub fn invariant_non_empty(field: &str, value: &str, action: &str) -> Result<(), EngineError> {
    if value.is_empty() {
        return Err(EngineError::InvalidCommand(format!(
            "{field} is required for {action}"
        )));
    }
    Ok(())
}

/// Invariant: sensor values are finite numbers.
pub fn invariant_finite(field: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidCommand(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(())
}

/// Invariant: registration happens once.
///
/// A stored record with `registered = false` does not count.
pub fn invariant_unregistered(
    existing: Option<&DeviceRecord>,
    device_id: &str,
) -> Result<(), EngineError> {
    match existing {
        Some(record) if record.registered => Err(EngineError::AlreadyRegistered {
            device_id: device_id.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Invariant: telemetry targets a registered device.
pub fn invariant_registered(
    existing: Option<DeviceRecord>,
    device_id: &str,
) -> Result<DeviceRecord, EngineError> {
    match existing {
        Some(record) if record.registered => Ok(record),
        _ => Err(EngineError::NotRegistered {
            device_id: device_id.to_string(),
        }),
    }
}

/// Invariant: only whitelisted devices report.
pub fn invariant_whitelisted(record: &DeviceRecord, device_id: &str) -> Result<(), EngineError> {
    if !record.whitelisted {
        return Err(EngineError::NotWhitelisted {
            device_id: device_id.to_string(),
        });
    }
    Ok(())
}

/// Invariant: telemetry signer is the key bound at registration.
pub fn invariant_owner_binding(
    record: &DeviceRecord,
    signer: &str,
    device_id: &str,
) -> Result<(), EngineError> {
    if record.owner_public_key != signer {
        return Err(EngineError::identity_mismatch(
            device_id,
            &record.owner_public_key,
            signer,
        ));
    }
    Ok(())
}

/// Invariant: every planned write stays inside the family namespace.
#[must_use]
pub fn invariant_write_set_in_namespace(
    deriver: &AddressDeriver,
    write_set: &WriteSet,
) -> Result<(), EngineError> {
    match write_set.addresses().find(|a| !deriver.owns(a)) {
        Some(address) => Err(EngineError::NamespaceViolation {
            address: address.to_string(),
        }),
        None => Ok(()),
    }
}
