//! # State Transition Engine
//!
//! A pure function of (prior state, command, signer) to (write-set, outcome).
//!
//! ```text
//! command ──► derive addresses ──► read snapshot ──► validate ──► plan writes
//!                                                                     │
//!                                               single set_state ◄────┘
//! ```
//!
//! Validation fully precedes planning, and planning produces one write-set,
//! so a rejected command never touches the store. The engine holds no state
//! between calls and does no logging; the processor service does both.

use crate::config::ContractConfig;
use crate::domain::command::Command;
use crate::domain::control::decide_pump;
use crate::domain::effects::{Effects, Outcome, WriteSet};
use crate::domain::entities::{DeviceRecord, TelemetryRecord};
use crate::domain::errors::EngineError;
use crate::domain::invariants::{
    invariant_finite, invariant_non_empty, invariant_owner_binding, invariant_registered,
    invariant_unregistered, invariant_whitelisted, invariant_write_set_in_namespace,
};
use crate::ports::outbound::{StateReader, StateWriter};
use gc_01_address_derivation::{AddressDeriver, StateAddress};

/// Applies Garden Contract commands to a state snapshot.
#[derive(Clone, Debug)]
pub struct Engine {
    deriver: AddressDeriver,
}

impl Engine {
    /// Engine for the family named in `config`.
    #[must_use]
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            deriver: AddressDeriver::new(config.family_name.clone()),
        }
    }

    /// Prefix of every address this engine reads or writes.
    #[must_use]
    pub fn namespace_prefix(&self) -> &str {
        self.deriver.namespace_prefix()
    }

    /// The deriver this engine uses.
    #[must_use]
    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    /// Validate `command` and commit its write-set through `writer`.
    pub fn apply<R, W>(
        &self,
        command: &Command,
        signer: &str,
        reader: &R,
        writer: &W,
    ) -> Result<Effects, EngineError>
    where
        R: StateReader + ?Sized,
        W: StateWriter + ?Sized,
    {
        let effects = self.execute(command, signer, reader)?;
        invariant_write_set_in_namespace(&self.deriver, &effects.write_set)?;
        writer.set_state(&effects.write_set)?;
        Ok(effects)
    }

    /// Validate `command` and plan its writes without committing them.
    pub fn execute<R>(
        &self,
        command: &Command,
        signer: &str,
        reader: &R,
    ) -> Result<Effects, EngineError>
    where
        R: StateReader + ?Sized,
    {
        if signer.is_empty() {
            return Err(EngineError::InvalidCommand(
                "signer identity is required".to_string(),
            ));
        }

        match command {
            Command::RegisterDevice {
                device_id,
                device_name,
                timestamp,
            } => self.register_device(
                device_id,
                device_name.as_deref(),
                timestamp.as_deref(),
                signer,
                reader,
            ),
            Command::SendTelemetry {
                device_id,
                temperature,
                humidity,
                timestamp,
            } => self.send_telemetry(device_id, *temperature, *humidity, timestamp, signer, reader),
        }
    }

    fn register_device<R>(
        &self,
        device_id: &str,
        device_name: Option<&str>,
        timestamp: Option<&str>,
        signer: &str,
        reader: &R,
    ) -> Result<Effects, EngineError>
    where
        R: StateReader + ?Sized,
    {
        invariant_non_empty("device_id", device_id, "registration")?;

        let device_address = self.deriver.device_address(device_id);
        let existing = self.read_device(reader, &device_address)?;
        invariant_unregistered(existing.as_ref(), device_id)?;

        let record = DeviceRecord::register(
            device_id,
            device_name.map(str::to_string),
            signer,
            timestamp.map(str::to_string),
        );

        let mut write_set = WriteSet::new();
        write_set.insert(device_address, record.encode()?);

        Ok(Effects {
            outcome: Outcome::DeviceRegistered {
                device_id: device_id.to_string(),
                owner_public_key: signer.to_string(),
            },
            write_set,
        })
    }

    fn send_telemetry<R>(
        &self,
        device_id: &str,
        temperature: f64,
        humidity: f64,
        timestamp: &str,
        signer: &str,
        reader: &R,
    ) -> Result<Effects, EngineError>
    where
        R: StateReader + ?Sized,
    {
        invariant_non_empty("device_id", device_id, "telemetry")?;
        invariant_non_empty("timestamp", timestamp, "telemetry")?;
        invariant_finite("temperature", temperature)?;
        invariant_finite("humidity", humidity)?;

        let device_address = self.deriver.device_address(device_id);
        let existing = self.read_device(reader, &device_address)?;
        let mut device = invariant_registered(existing, device_id)?;
        invariant_whitelisted(&device, device_id)?;
        invariant_owner_binding(&device, signer, device_id)?;

        let pump_status = decide_pump(humidity);
        let telemetry =
            TelemetryRecord::new(device_id, temperature, humidity, timestamp, pump_status);
        let telemetry_address = self.deriver.telemetry_address(device_id, timestamp);
        device.record_reading(&telemetry);

        let mut write_set = WriteSet::new();
        write_set.insert(telemetry_address.clone(), telemetry.encode()?);
        write_set.insert(device_address, device.encode()?);

        Ok(Effects {
            outcome: Outcome::TelemetryRecorded {
                device_id: device_id.to_string(),
                pump_status,
                telemetry_address,
            },
            write_set,
        })
    }

    fn read_device<R>(
        &self,
        reader: &R,
        address: &StateAddress,
    ) -> Result<Option<DeviceRecord>, EngineError>
    where
        R: StateReader + ?Sized,
    {
        reader
            .get_one(address)?
            .map(|bytes| DeviceRecord::decode(address, &bytes))
            .transpose()
    }
}
