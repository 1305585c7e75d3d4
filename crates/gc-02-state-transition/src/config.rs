//! # Contract Configuration
//!
//! Family identity is passed into the engine instead of living in
//! module-level constants.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GARDEN_FAMILY_NAME` | `GardenContract` |
//! | `GARDEN_FAMILY_VERSION` | `1.0` |

use std::env;
use thiserror::Error;

/// Default transaction family name.
pub const DEFAULT_FAMILY_NAME: &str = "GardenContract";

/// Default transaction family version.
pub const DEFAULT_FAMILY_VERSION: &str = "1.0";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Family name is empty.
    #[error("family name must not be empty")]
    EmptyFamilyName,

    /// Family version is empty.
    #[error("family version must not be empty")]
    EmptyFamilyVersion,
}

/// Transaction family configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Family name; its SHA-512 prefix is the namespace.
    pub family_name: String,
    /// Family version accepted by the processor.
    pub family_version: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            family_version: DEFAULT_FAMILY_VERSION.to_string(),
        }
    }
}

impl ContractConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            family_name: env::var("GARDEN_FAMILY_NAME")
                .unwrap_or_else(|_| DEFAULT_FAMILY_NAME.to_string()),
            family_version: env::var("GARDEN_FAMILY_VERSION")
                .unwrap_or_else(|_| DEFAULT_FAMILY_VERSION.to_string()),
        }
    }

    /// Reject configurations the processor cannot register with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.family_name.trim().is_empty() {
            return Err(ConfigError::EmptyFamilyName);
        }
        if self.family_version.trim().is_empty() {
            return Err(ConfigError::EmptyFamilyVersion);
        }
        Ok(())
    }
}
