//! # Payload Codec
//!
//! Turns raw JSON transaction payloads into typed commands, and back for
//! clients. Everything that does not fit a command variant is rejected here
//! as `InvalidCommand`, before the engine runs.

use crate::domain::command::{Action, Command, DEFAULT_DEVICE_NAME};
use crate::domain::errors::EngineError;
use serde::Deserialize;
use serde_json::{json, Value};

fn default_device_name() -> Option<String> {
    Some(DEFAULT_DEVICE_NAME.to_string())
}

/// Payload fields as they arrive. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawPayload {
    action: Option<String>,
    device_id: Option<String>,
    /// Absent means the default name; an explicit `null` is kept.
    #[serde(default = "default_device_name")]
    device_name: Option<String>,
    #[serde(default)]
    timestamp: Value,
    #[serde(default)]
    temperature: Value,
    #[serde(default)]
    humidity: Value,
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidCommand(message.into())
}

/// Decode a JSON payload into a command.
pub fn decode_payload(bytes: &[u8]) -> Result<Command, EngineError> {
    let raw: RawPayload = serde_json::from_slice(bytes)
        .map_err(|e| invalid(format!("malformed payload: {e}")))?;

    let action: Action = raw
        .action
        .as_deref()
        .ok_or_else(|| invalid("action is required"))?
        .parse()?;

    match action {
        Action::RegisterDevice => {
            let device_id = required_id(raw.device_id, "registration")?;
            Ok(Command::RegisterDevice {
                device_id,
                device_name: raw.device_name,
                timestamp: optional_string("timestamp", raw.timestamp)?,
            })
        }
        Action::SendTelemetry => {
            let device_id = required_id(raw.device_id, "telemetry")?;
            if raw.temperature.is_null() || raw.humidity.is_null() {
                return Err(invalid("temperature and humidity are required"));
            }
            let temperature = number("temperature", &raw.temperature)?;
            let humidity = number("humidity", &raw.humidity)?;
            let timestamp = optional_string("timestamp", raw.timestamp)?
                .filter(|ts| !ts.is_empty())
                .ok_or_else(|| invalid("timestamp is required for telemetry"))?;
            Ok(Command::SendTelemetry {
                device_id,
                temperature,
                humidity,
                timestamp,
            })
        }
    }
}

/// Encode a command as a JSON payload.
pub fn encode_payload(command: &Command) -> Vec<u8> {
    let value = match command {
        Command::RegisterDevice {
            device_id,
            device_name,
            timestamp,
        } => json!({
            "action": Action::RegisterDevice.as_str(),
            "device_id": device_id,
            "device_name": device_name,
            "timestamp": timestamp,
        }),
        Command::SendTelemetry {
            device_id,
            temperature,
            humidity,
            timestamp,
        } => json!({
            "action": Action::SendTelemetry.as_str(),
            "device_id": device_id,
            "temperature": temperature,
            "humidity": humidity,
            "timestamp": timestamp,
        }),
    };
    value.to_string().into_bytes()
}

fn required_id(device_id: Option<String>, action: &str) -> Result<String, EngineError> {
    device_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| invalid(format!("device_id is required for {action}")))
}

fn optional_string(field: &str, value: Value) -> Result<Option<String>, EngineError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(invalid(format!("{field} must be a string, got {other}"))),
    }
}

fn number(field: &str, value: &Value) -> Result<f64, EngineError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(format!("{field} must be numeric, got {value}")))
}
