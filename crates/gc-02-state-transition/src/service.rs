//! # Garden Processor Service
//!
//! The transaction handler the validator talks to. It wraps the pure engine
//! with everything the engine leaves out:
//!
//! - family/version routing and payload decoding
//! - per-device serialization through the address lock table
//! - logging and processing statistics
//! - mapping engine errors to validator-facing `ApplyError`s
//!
//! ## Security
//!
//! - Identity comes only from `header.signer_public_key`
//! - Only the engine's write-set is committed, in one `set_state` call

use crate::adapters::{decode_payload, AddressLockTable};
use crate::config::{ConfigError, ContractConfig};
use crate::domain::command::Command;
use crate::domain::effects::{Effects, Outcome};
use crate::domain::errors::EngineError;
use crate::engine::Engine;
use crate::ports::inbound::{ApplyError, TransactionHandler, TransactionRequest};
use crate::ports::outbound::StateContext;
use parking_lot::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Processing statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Transactions handed to `apply`.
    pub transactions_processed: u64,
    /// Transactions committed.
    pub accepted: u64,
    /// Transactions rejected as invalid.
    pub rejected: u64,
    /// Transactions failed by the store.
    pub internal_errors: u64,
    /// Devices registered.
    pub devices_registered: u64,
    /// Telemetry records appended.
    pub telemetry_recorded: u64,
    /// Readings that switched the pump on.
    pub pump_activations: u64,
}

/// Transaction handler for the Garden Contract family.
pub struct GardenProcessor {
    config: ContractConfig,
    engine: Engine,
    locks: AddressLockTable,
    stats: RwLock<ProcessorStats>,
}

impl GardenProcessor {
    /// Create a processor, validating `config` first.
    pub fn new(config: ContractConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = Engine::new(&config);
        info!(
            family = %config.family_name,
            version = %config.family_version,
            namespace = %engine.namespace_prefix(),
            "Garden Contract processor ready"
        );
        Ok(Self {
            config,
            engine,
            locks: AddressLockTable::new(),
            stats: RwLock::new(ProcessorStats::default()),
        })
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Snapshot of the statistics.
    #[must_use]
    pub fn stats(&self) -> ProcessorStats {
        self.stats.read().clone()
    }

    fn check_header(&self, request: &TransactionRequest) -> Result<(), ApplyError> {
        let header = &request.header;
        if header.family_name != self.config.family_name {
            return Err(ApplyError::InvalidTransaction(format!(
                "unsupported family {}",
                header.family_name
            )));
        }
        if header.family_version != self.config.family_version {
            return Err(ApplyError::InvalidTransaction(format!(
                "unsupported {} version {}",
                header.family_name, header.family_version
            )));
        }
        Ok(())
    }

    fn run(
        &self,
        command: &Command,
        signer: &str,
        context: &dyn StateContext,
    ) -> Result<Effects, EngineError> {
        let device_address = self.engine.deriver().device_address(command.device_id());
        let _guard = self.locks.lock(&device_address);

        self.engine.apply(command, signer, context, context)
    }

    fn record(&self, result: &Result<Effects, ApplyError>) {
        let mut stats = self.stats.write();
        stats.transactions_processed += 1;
        match result {
            Ok(effects) => {
                stats.accepted += 1;
                match &effects.outcome {
                    Outcome::DeviceRegistered { .. } => stats.devices_registered += 1,
                    Outcome::TelemetryRecorded { pump_status, .. } => {
                        stats.telemetry_recorded += 1;
                        if pump_status.is_on() {
                            stats.pump_activations += 1;
                        }
                    }
                }
            }
            Err(ApplyError::InvalidTransaction(_)) => stats.rejected += 1,
            Err(ApplyError::InternalError(_)) => stats.internal_errors += 1,
        }
    }
}

impl TransactionHandler for GardenProcessor {
    fn family_name(&self) -> &str {
        &self.config.family_name
    }

    fn family_versions(&self) -> Vec<String> {
        vec![self.config.family_version.clone()]
    }

    fn namespaces(&self) -> Vec<String> {
        vec![self.engine.namespace_prefix().to_string()]
    }

    #[instrument(skip_all, fields(signer = %short_key(&request.header.signer_public_key)))]
    fn apply(
        &self,
        request: &TransactionRequest,
        context: &dyn StateContext,
    ) -> Result<Effects, ApplyError> {
        let result = self.check_header(request).and_then(|()| {
            let command = decode_payload(&request.payload)?;
            info!(
                action = %command.action(),
                device_id = %command.device_id(),
                "Processing transaction"
            );
            self.run(&command, &request.header.signer_public_key, context)
                .map_err(ApplyError::from)
        });

        match &result {
            Ok(effects) => match &effects.outcome {
                Outcome::DeviceRegistered { device_id, .. } => {
                    info!(device_id = %device_id, "Device registered successfully");
                }
                Outcome::TelemetryRecorded {
                    device_id,
                    pump_status,
                    ..
                } => {
                    if pump_status.is_on() {
                        warn!(
                            device_id = %device_id,
                            pump = %pump_status,
                            "Low humidity: irrigation pump switched on"
                        );
                    } else {
                        debug!(device_id = %device_id, pump = %pump_status, "Humidity normal");
                    }
                    info!(
                        device_id = %device_id,
                        writes = effects.write_count(),
                        "Telemetry recorded"
                    );
                }
            },
            Err(ApplyError::InvalidTransaction(reason)) => {
                warn!(reason = %reason, "Transaction rejected");
            }
            Err(ApplyError::InternalError(reason)) => {
                error!(reason = %reason, "Transaction failed on state service");
            }
        }

        self.record(&result);
        result
    }
}

fn short_key(key: &str) -> String {
    key.chars().take(16).collect()
}
