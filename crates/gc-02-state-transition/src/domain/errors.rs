//! # Domain Errors
//!
//! Every failure `apply` can return. None of them leave writes behind.

use crate::ports::outbound::StoreError;
use thiserror::Error;

/// Characters of a public key shown in an identity mismatch.
pub const KEY_DISPLAY_PREFIX: usize = 16;

/// Errors returned by the state transition engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or missing fields, or an unknown action.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A device record with `registered = true` already exists.
    #[error("Device {device_id} is already registered")]
    AlreadyRegistered {
        /// Device id from the command
        device_id: String,
    },

    /// No registered device record exists for the telemetry.
    #[error("Device {device_id} is not registered")]
    NotRegistered {
        /// Device id from the command
        device_id: String,
    },

    /// The device exists but its whitelist flag is off.
    #[error("Device {device_id} is not whitelisted")]
    NotWhitelisted {
        /// Device id from the command
        device_id: String,
    },

    /// Telemetry signer differs from the key bound at registration.
    #[error("Device {device_id} public key mismatch. Expected {expected}..., got {actual}...")]
    IdentityMismatch {
        /// Device id from the command
        device_id: String,
        /// Leading characters of the registered key
        expected: String,
        /// Leading characters of the signer key
        actual: String,
    },

    /// A stored value could not be decoded as the record it should hold.
    #[error("malformed state at {address}: {reason}")]
    MalformedState {
        /// Address holding the bad value
        address: String,
        /// Decoder message
        reason: String,
    },

    /// A planned write falls outside the family namespace. Engine fault,
    /// not the submitter's.
    #[error("write-set address {address} is outside the family namespace")]
    NamespaceViolation {
        /// First offending address
        address: String,
    },

    /// The state store failed; resubmit unchanged.
    #[error("state store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl EngineError {
    /// Build an identity mismatch, keeping only the key prefixes.
    pub fn identity_mismatch(device_id: &str, expected: &str, actual: &str) -> Self {
        Self::IdentityMismatch {
            device_id: device_id.to_string(),
            expected: key_prefix(expected),
            actual: key_prefix(actual),
        }
    }

    /// Returns true if the caller must change the command to succeed.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !self.is_internal()
    }

    /// Returns true if the failure lies with the processor or its store.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.is_retryable() || matches!(self, Self::NamespaceViolation { .. })
    }

    /// Returns true if resubmitting the same command may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

fn key_prefix(key: &str) -> String {
    key.chars().take(KEY_DISPLAY_PREFIX).collect()
}
