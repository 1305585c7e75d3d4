//! # GC-02 State Transition - Garden Contract Engine
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (domain, ports, adapters, service)
//! **Dependencies:** GC-01 Address Derivation
//!
//! ## Purpose
//!
//! Decides how the shared key/value state changes when an authenticated
//! transaction arrives. Two commands exist:
//!
//! - `REGISTER_DEVICE` binds a device id to its first submitter's key
//! - `SEND_TELEMETRY` appends a reading and derives the pump decision
//!
//! A command either produces exactly one write-set or an error that leaves
//! the state untouched.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Registration is first-come, first-served | `domain/invariants.rs` - `invariant_unregistered()` |
//! | Only registered, whitelisted devices report | `domain/invariants.rs` - `invariant_registered()`, `invariant_whitelisted()` |
//! | Signer must equal stored owner key | `domain/invariants.rs` - `invariant_owner_binding()` |
//! | Pump ON iff humidity < 30.0 | `domain/control.rs` - `decide_pump()` |
//! | Atomic write-set | `engine.rs` - `Engine::apply()` issues one `set_state` |
//! | Namespace containment | `domain/invariants.rs` - `invariant_write_set_in_namespace()` |
//!
//! ## Security
//!
//! - **Signer-Only Identity**: ownership comes from the transaction header,
//!   never from payload fields
//! - **Validation Before Writes**: rejected commands issue no `set_state`
//!
//! ## Outbound Dependencies
//!
//! | Port | Trait | Purpose |
//! |------|-------|---------|
//! | State service | `StateReader` | Batched reads of current values |
//! | State service | `StateWriter` | Atomic write-set commit |
//!
//! ## Usage Example
//!
//! ```ignore
//! use gc_02_state_transition::prelude::*;
//!
//! let processor = GardenProcessor::new(ContractConfig::from_env())?;
//! let effects = processor.apply(&request, &state)?;
//! println!("pump: {:?}", effects.pump_status());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{decode_payload, encode_payload, InMemoryState};
    pub use crate::config::{ConfigError, ContractConfig};
    pub use crate::domain::{
        decide_pump, Action, Command, DeviceRecord, EngineError, Effects, LastReading, Outcome,
        PumpStatus, TelemetryRecord, WriteSet, PUMP_THRESHOLD,
    };
    pub use crate::engine::Engine;
    pub use crate::ports::{
        ApplyError, StateContext, StateReader, StateWriter, StoreError, TransactionHandler,
        TransactionHeader, TransactionRequest,
    };
    pub use crate::service::{GardenProcessor, ProcessorStats};
    pub use gc_01_address_derivation::{AddressDeriver, StateAddress};
}

pub use config::ContractConfig;
pub use engine::Engine;
pub use service::GardenProcessor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
