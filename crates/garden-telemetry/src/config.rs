//! Logging configuration from environment variables.

use std::env;

/// Service name used when `GARDEN_SERVICE_NAME` is unset.
pub const DEFAULT_SERVICE_NAME: &str = "garden-contract";

/// Configuration for processor logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to startup events
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or full directive
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: level_for_verbosity(0).to_string(),
            json_logs: false,
        }
    }
}

/// Level for a `-v` count: none is warn, one is info, more is debug.
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GARDEN_SERVICE_NAME`: Service name (default: garden-contract)
    /// - `GARDEN_LOG_LEVEL` or `RUST_LOG`: Log level (default: warn)
    /// - `GARDEN_JSON_LOGS`: Enable JSON logs (default: false)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: env::var("GARDEN_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("GARDEN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("GARDEN_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Override the level from a command-line verbosity count.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.log_level = level_for_verbosity(verbosity).to_string();
        self
    }
}
