//! # Driving Ports (API - Inbound)
//!
//! How the validator's transport hands transactions to this family.
//! The transport has already checked the signature; the header's
//! `signer_public_key` is trusted as the submitter's identity.

use crate::domain::effects::Effects;
use crate::domain::errors::EngineError;
use crate::ports::outbound::StateContext;
use thiserror::Error;

/// Authenticated transaction header fields the handler uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionHeader {
    /// Family the transaction was addressed to.
    pub family_name: String,
    /// Family version the client targeted.
    pub family_version: String,
    /// Verified signer.
    pub signer_public_key: String,
}

/// One transaction to process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Header fields.
    pub header: TransactionHeader,
    /// Raw payload bytes (JSON).
    pub payload: Vec<u8>,
}

/// Errors reported back to the validator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The transaction is invalid and will never succeed as submitted.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Infrastructure failure; the validator may retry.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<EngineError> for ApplyError {
    fn from(err: EngineError) -> Self {
        if err.is_internal() {
            Self::InternalError(err.to_string())
        } else {
            Self::InvalidTransaction(err.to_string())
        }
    }
}

/// A transaction family handler.
pub trait TransactionHandler: Send + Sync {
    /// Family this handler serves.
    fn family_name(&self) -> &str;

    /// Versions of the family it accepts.
    fn family_versions(&self) -> Vec<String>;

    /// Address prefixes it owns.
    fn namespaces(&self) -> Vec<String>;

    /// Process one transaction against `context`.
    fn apply(
        &self,
        request: &TransactionRequest,
        context: &dyn StateContext,
    ) -> Result<Effects, ApplyError>;
}
