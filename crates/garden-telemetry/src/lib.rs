//! # Garden Telemetry
//!
//! Structured logging for the Garden Contract processor.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garden_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env().with_verbosity(1);
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GARDEN_LOG_LEVEL` / `RUST_LOG` | `warn` | Log level filter |
//! | `GARDEN_JSON_LOGS` | `false` | Emit JSON lines instead of text |
//! | `GARDEN_SERVICE_NAME` | `garden-contract` | Service name on every event |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{level_for_verbosity, TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{init_logging, init_test_logging};

use thiserror::Error;

/// Logging initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive as given.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}
