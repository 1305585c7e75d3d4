//! # Commands
//!
//! Typed commands the engine accepts. Field presence per action is enforced
//! by the shape of each variant; the payload adapter rejects anything that
//! does not fit before the engine sees it.

use super::errors::EngineError;
use std::fmt;
use std::str::FromStr;

/// Display name given to devices registered without one.
pub const DEFAULT_DEVICE_NAME: &str = "Unnamed Device";

/// Action discriminator carried in every payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// `REGISTER_DEVICE`
    RegisterDevice,
    /// `SEND_TELEMETRY`
    SendTelemetry,
}

impl Action {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegisterDevice => "REGISTER_DEVICE",
            Self::SendTelemetry => "SEND_TELEMETRY",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTER_DEVICE" => Ok(Self::RegisterDevice),
            "SEND_TELEMETRY" => Ok(Self::SendTelemetry),
            other => Err(EngineError::InvalidCommand(format!("Unknown action: {other}"))),
        }
    }
}

/// A decoded, attributed request to change state.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Bind a new device id to the signer.
    RegisterDevice {
        /// Caller-supplied unique id
        device_id: String,
        /// Display name; `None` when the payload sent an explicit `null`
        device_name: Option<String>,
        /// Opaque ordering token, stored as `registered_at`
        timestamp: Option<String>,
    },
    /// Report a sensor reading for a registered device.
    SendTelemetry {
        /// Device the reading belongs to
        device_id: String,
        /// Degrees, as reported
        temperature: f64,
        /// Relative humidity percent, not clamped
        humidity: f64,
        /// Reading timestamp; part of the telemetry address
        timestamp: String,
    },
}

impl Command {
    /// Registration with the default display name.
    pub fn register(device_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::RegisterDevice {
            device_id: device_id.into(),
            device_name: Some(DEFAULT_DEVICE_NAME.to_string()),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Telemetry submission.
    pub fn telemetry(
        device_id: impl Into<String>,
        temperature: f64,
        humidity: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::SendTelemetry {
            device_id: device_id.into(),
            temperature,
            humidity,
            timestamp: timestamp.into(),
        }
    }

    /// The action this command performs.
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::RegisterDevice { .. } => Action::RegisterDevice,
            Self::SendTelemetry { .. } => Action::SendTelemetry,
        }
    }

    /// Target device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        match self {
            Self::RegisterDevice { device_id, .. } | Self::SendTelemetry { device_id, .. } => {
                device_id
            }
        }
    }
}
