//! # Irrigation Control Rule
//!
//! The embedded decision every replica must compute identically:
//! the pump runs when humidity is strictly below the threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Humidity (percent) below which the pump is switched on.
pub const PUMP_THRESHOLD: f64 = 30.0;

/// Pump decision recorded with each reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PumpStatus {
    /// Irrigation requested.
    On,
    /// No irrigation.
    #[default]
    Off,
}

impl PumpStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    /// True when this decision triggered the contract.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the pump state for a humidity reading.
#[must_use]
pub fn decide_pump(humidity: f64) -> PumpStatus {
    if humidity < PUMP_THRESHOLD {
        PumpStatus::On
    } else {
        PumpStatus::Off
    }
}
