//! # GC-01 Address Derivation
//!
//! Deterministic, namespaced storage keys for the Garden Contract family.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (domain only, no ports)
//! **Dependencies:** none
//!
//! ## Purpose
//!
//! Every record the state transition engine touches lives at an address
//! derived here. Addresses are 70 lowercase hex characters:
//!
//! ```text
//! device:    [ prefix 6 ][ sha512(device_id)[..64]                               ]
//! telemetry: [ prefix 6 ][ sha512(device_id + "_telemetry")[..22] ][ sha512(ts)[..42] ]
//! ```
//!
//! The prefix is the first 6 hex characters of `sha512(family_name)`, which
//! claims a disjoint region of the shared key space for this family.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Fixed address length (70) | `domain/deriver.rs` - const asserts on segment sizes |
//! | Pure derivation | `domain/deriver.rs` - no state beyond the cached prefix |
//! | Namespace containment | `domain/value_objects.rs` - `StateAddress::is_in_namespace()` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

pub use domain::{
    device_address, namespace_prefix, sha512_hex, telemetry_address, AddressDeriver,
    AddressError, StateAddress, ADDRESS_LENGTH, DEVICE_HASH_LENGTH, PREFIX_LENGTH,
    TELEMETRY_DEVICE_SEGMENT_LENGTH, TELEMETRY_MARKER, TELEMETRY_TIMESTAMP_SEGMENT_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
