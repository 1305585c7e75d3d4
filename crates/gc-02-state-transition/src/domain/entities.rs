//! # Domain Entities
//!
//! The two record kinds the store holds for this family.
//!
//! Decoding is lenient in the same places other writers to the namespace
//! rely on: absent or `null` flags read as `false`, `null` strings read as
//! empty, and keys this crate does not know are carried through a
//! whole-record overwrite untouched. A `null` device name stays `null`.

use super::canonical;
use super::command::DEFAULT_DEVICE_NAME;
use super::control::PumpStatus;
use super::errors::EngineError;
use gc_01_address_derivation::StateAddress;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

fn default_device_name() -> Option<String> {
    Some(DEFAULT_DEVICE_NAME.to_string())
}

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Snapshot of the most recent accepted reading, embedded in the device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastReading {
    /// Temperature as reported.
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: f64,
    /// Humidity as reported.
    #[serde(default, deserialize_with = "null_as_default")]
    pub humidity: f64,
    /// Reading timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    /// Pump decision for this reading.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pump_status: PumpStatus,
}

/// One registered device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Caller-supplied unique id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_id: String,
    /// Display name; `null` when registered with an explicit `null`.
    #[serde(default = "default_device_name")]
    pub device_name: Option<String>,
    /// Signer bound at registration; immutable.
    #[serde(rename = "public_key", default, deserialize_with = "null_as_default")]
    pub owner_public_key: String,
    /// True once created.
    #[serde(default, deserialize_with = "null_as_default")]
    pub registered: bool,
    /// Registration timestamp, as supplied.
    #[serde(default)]
    pub registered_at: Option<String>,
    /// Gates telemetry acceptance.
    #[serde(default, deserialize_with = "null_as_default")]
    pub whitelisted: bool,
    /// Most recent accepted reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<LastReading>,
    /// Timestamp of the most recent accepted reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Keys written by other tools.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DeviceRecord {
    /// A freshly registered, whitelisted device with no readings.
    pub fn register(
        device_id: impl Into<String>,
        device_name: Option<String>,
        owner_public_key: impl Into<String>,
        registered_at: Option<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            device_name,
            owner_public_key: owner_public_key.into(),
            registered: true,
            registered_at,
            whitelisted: true,
            last_reading: None,
            last_update: None,
            extra: BTreeMap::new(),
        }
    }

    /// Record an accepted reading in place.
    pub fn record_reading(&mut self, telemetry: &TelemetryRecord) {
        self.last_reading = Some(LastReading {
            temperature: telemetry.temperature,
            humidity: telemetry.humidity,
            timestamp: telemetry.timestamp.clone(),
            pump_status: telemetry.pump_status,
        });
        self.last_update = Some(telemetry.timestamp.clone());
    }

    /// Canonical bytes for the store.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        canonical::encode(self)
    }

    /// Decode the value stored at `address`.
    pub fn decode(address: &StateAddress, bytes: &[u8]) -> Result<Self, EngineError> {
        canonical::decode(address, bytes)
    }
}

/// One accepted telemetry submission. Append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Reserved for the validator; always written as `null`.
    #[serde(default)]
    pub block_height: Option<u64>,
    /// Owning device.
    pub device_id: String,
    /// Humidity as reported.
    pub humidity: f64,
    /// Pump decision.
    pub pump_status: PumpStatus,
    /// True iff the pump was switched on.
    pub smart_contract_triggered: bool,
    /// Temperature as reported.
    pub temperature: f64,
    /// Reading timestamp.
    pub timestamp: String,
}

impl TelemetryRecord {
    /// Build a record with the decision embedded.
    pub fn new(
        device_id: impl Into<String>,
        temperature: f64,
        humidity: f64,
        timestamp: impl Into<String>,
        pump_status: PumpStatus,
    ) -> Self {
        Self {
            block_height: None,
            device_id: device_id.into(),
            humidity,
            pump_status,
            smart_contract_triggered: pump_status.is_on(),
            temperature,
            timestamp: timestamp.into(),
        }
    }

    /// Canonical bytes for the store.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        canonical::encode(self)
    }

    /// Decode the value stored at `address`.
    pub fn decode(address: &StateAddress, bytes: &[u8]) -> Result<Self, EngineError> {
        canonical::decode(address, bytes)
    }
}
