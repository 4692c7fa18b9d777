//! Inbound device messages.
//!
//! The device pushes a full-state snapshot on every relevant change. The
//! firmware also mirrors its serial log onto the same socket as raw text,
//! so a frame is either a JSON object or a log line.
//!
//! # Format
//!
//! ```json
//! {
//!   "action": "update",
//!   "deviceName": "Desk bar",
//!   "ledState": true,
//!   "brightness": 80,
//!   "timerEnabled": true,
//!   "onHour": 20, "onMinute": 0,
//!   "offHour": 6, "offMinute": 0
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::time::{Schedule, TimeOfDay};

// ============================================================================
// Constants
// ============================================================================

/// The only inbound action the panel reacts to.
pub const UPDATE_ACTION: &str = "update";

/// Highest brightness value the device accepts.
pub const MAX_BRIGHTNESS: u8 = 100;

// ============================================================================
// DeviceSnapshot
// ============================================================================

/// Full device state as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct DeviceSnapshot {
    /// Human-readable device name, if the device reports one.
    pub device_name: Option<String>,
    /// Whether the LEDs are on.
    pub led_state: bool,
    /// Brightness, 0-100.
    pub brightness: u8,
    /// Whether the on/off timer is active.
    pub timer_enabled: bool,
    /// Timer on/off times.
    pub schedule: Schedule,
}

/// Wire shape of an `update` frame before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    device_name: Option<String>,
    led_state: bool,
    brightness: u8,
    timer_enabled: bool,
    on_hour: u8,
    on_minute: u8,
    off_hour: u8,
    off_minute: u8,
}

impl TryFrom<RawSnapshot> for DeviceSnapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        if raw.brightness > MAX_BRIGHTNESS {
            return Err(Error::decode(format!(
                "brightness {} exceeds {MAX_BRIGHTNESS}",
                raw.brightness
            )));
        }

        let on = TimeOfDay::new(raw.on_hour, raw.on_minute)
            .map_err(|e| Error::decode(format!("on time: {e}")))?;
        let off = TimeOfDay::new(raw.off_hour, raw.off_minute)
            .map_err(|e| Error::decode(format!("off time: {e}")))?;

        Ok(Self {
            device_name: raw.device_name.filter(|name| !name.is_empty()),
            led_state: raw.led_state,
            brightness: raw.brightness,
            timer_enabled: raw.timer_enabled,
            schedule: Schedule::new(on, off),
        })
    }
}

// ============================================================================
// InboundMessage
// ============================================================================

/// A decoded inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Full-state snapshot (`action == "update"`).
    Update(DeviceSnapshot),

    /// JSON message with an action the panel does not handle.
    Ignored {
        /// The unrecognized action.
        action: String,
    },

    /// Raw log line mirrored from the device's serial output.
    Log(String),
}

impl InboundMessage {
    /// Decodes a text frame.
    ///
    /// Frames whose first non-whitespace character is not `{` are treated
    /// as device log output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the frame looks like JSON but is
    /// malformed, has no string `action`, or is an `update` with missing
    /// or out-of-range fields.
    pub fn decode(text: &str) -> Result<Self> {
        if !text.trim_start().starts_with('{') {
            return Ok(Self::Log(text.trim_end().to_string()));
        }

        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::decode(format!("malformed JSON: {e}")))?;

        let action = value
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::decode("missing string field `action`"))?;

        if action != UPDATE_ACTION {
            return Ok(Self::Ignored {
                action: action.to_string(),
            });
        }

        let snapshot = DeviceSnapshot::deserialize(value)
            .map_err(|e| Error::decode(format!("invalid update: {e}")))?;

        Ok(Self::Update(snapshot))
    }
}

// ============================================================================
// Tests
// ============================================================================
