//! # Address Deriver
//!
//! Maps semantic identifiers to fixed-length keys inside the family namespace.
//!
//! Device and telemetry keys share the prefix but their hash segments come
//! from different inputs (`device_id` vs `device_id + "_telemetry"` and the
//! timestamp), so the two record kinds do not collide.

use super::value_objects::{StateAddress, ADDRESS_LENGTH, PREFIX_LENGTH};
use sha2::{Digest, Sha512};

/// Hex characters of `sha512(device_id)` used in a device address.
pub const DEVICE_HASH_LENGTH: usize = 64;

/// Hex characters of the salted device hash used in a telemetry address.
pub const TELEMETRY_DEVICE_SEGMENT_LENGTH: usize = 22;

/// Hex characters of `sha512(timestamp)` used in a telemetry address.
pub const TELEMETRY_TIMESTAMP_SEGMENT_LENGTH: usize = 42;

/// Salt appended to the device id before hashing a telemetry address.
pub const TELEMETRY_MARKER: &str = "_telemetry";

const _: () = assert!(PREFIX_LENGTH + DEVICE_HASH_LENGTH == ADDRESS_LENGTH);
const _: () = assert!(
    PREFIX_LENGTH + TELEMETRY_DEVICE_SEGMENT_LENGTH + TELEMETRY_TIMESTAMP_SEGMENT_LENGTH
        == ADDRESS_LENGTH
);

/// Lowercase hex SHA-512 of `value`.
#[must_use]
pub fn sha512_hex(value: &str) -> String {
    hex::encode(Sha512::digest(value.as_bytes()))
}

/// Namespace prefix for a transaction family.
#[must_use]
pub fn namespace_prefix(family_name: &str) -> String {
    let mut digest = sha512_hex(family_name);
    digest.truncate(PREFIX_LENGTH);
    digest
}

/// Device address under `prefix`.
#[must_use]
pub fn device_address(prefix: &str, device_id: &str) -> StateAddress {
    let digest = sha512_hex(device_id);
    StateAddress::from_derived(format!("{prefix}{}", &digest[..DEVICE_HASH_LENGTH]))
}

/// Telemetry address under `prefix`.
#[must_use]
pub fn telemetry_address(prefix: &str, device_id: &str, timestamp: &str) -> StateAddress {
    let device_segment = sha512_hex(&format!("{device_id}{TELEMETRY_MARKER}"));
    let timestamp_segment = sha512_hex(timestamp);
    StateAddress::from_derived(format!(
        "{prefix}{}{}",
        &device_segment[..TELEMETRY_DEVICE_SEGMENT_LENGTH],
        &timestamp_segment[..TELEMETRY_TIMESTAMP_SEGMENT_LENGTH],
    ))
}

/// Address deriver bound to one family namespace.
///
/// Construct once per engine and share; it holds nothing but the prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressDeriver {
    family_name: String,
    prefix: String,
}

impl AddressDeriver {
    /// Create a deriver for `family_name`.
    pub fn new(family_name: impl Into<String>) -> Self {
        let family_name = family_name.into();
        let prefix = namespace_prefix(&family_name);
        Self {
            family_name,
            prefix,
        }
    }

    /// Family name this deriver was built from.
    #[must_use]
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// The 6-character namespace prefix.
    #[must_use]
    pub fn namespace_prefix(&self) -> &str {
        &self.prefix
    }

    /// Address of the device record for `device_id`.
    #[must_use]
    pub fn device_address(&self, device_id: &str) -> StateAddress {
        device_address(&self.prefix, device_id)
    }

    /// Address of the telemetry record for `(device_id, timestamp)`.
    #[must_use]
    pub fn telemetry_address(&self, device_id: &str, timestamp: &str) -> StateAddress {
        telemetry_address(&self.prefix, device_id, timestamp)
    }

    /// Returns true if `address` belongs to this deriver's namespace.
    #[must_use]
    pub fn owns(&self, address: &StateAddress) -> bool {
        address.is_in_namespace(&self.prefix)
    }
}
