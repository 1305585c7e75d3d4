//! Shared builders for tests and benchmarks.

use gc_02_state_transition::adapters::encode_payload;
use gc_02_state_transition::config::{DEFAULT_FAMILY_NAME, DEFAULT_FAMILY_VERSION};
use gc_02_state_transition::domain::Command;
use gc_02_state_transition::ports::{TransactionHeader, TransactionRequest};

/// Owner key used across scenarios.
pub const K1: &str = "02a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

/// A second, unrelated key.
pub const K2: &str = "03ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

/// Wrap `command` as a transaction for the default family, signed by `signer`.
#[must_use]
pub fn request(command: &Command, signer: &str) -> TransactionRequest {
    raw_request(encode_payload(command), signer)
}

/// A transaction with an arbitrary payload.
#[must_use]
pub fn raw_request(payload: Vec<u8>, signer: &str) -> TransactionRequest {
    TransactionRequest {
        header: TransactionHeader {
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            family_version: DEFAULT_FAMILY_VERSION.to_string(),
            signer_public_key: signer.to_string(),
        },
        payload,
    }
}

/// Deterministic timestamp for reading `n`.
#[must_use]
pub fn timestamp(n: usize) -> String {
    format!("2025-06-01T{:02}:{:02}:{:02}Z", (n / 3600) % 24, (n / 60) % 60, n % 60)
}
