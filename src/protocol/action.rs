//! Outbound action messages.
//!
//! Each user interaction that changes device state produces one
//! [`ActionMessage`], serialized as a single JSON text frame.
//!
//! # Actions
//!
//! | `action` | Fields |
//! |----------|--------|
//! | `toggle` | `state` |
//! | `brightness` | `value` |
//! | `updateTimer` | `enabled`, `onHour?`, `onMinute?`, `offHour?`, `offMinute?` |

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use super::time::Schedule;

// ============================================================================
// ActionMessage
// ============================================================================

/// A single-purpose command sent from the panel to the device.
///
/// # Format
///
/// ```json
/// { "action": "updateTimer", "enabled": true, "onHour": 7, "onMinute": 30, "offHour": 18, "offMinute": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum ActionMessage {
    /// Switch the LEDs on or off.
    #[serde(rename = "toggle")]
    Toggle {
        /// Requested LED state.
        state: bool,
    },

    /// Set the brightness (0-100).
    #[serde(rename = "brightness")]
    Brightness {
        /// Requested brightness.
        value: u8,
    },

    /// Enable or disable the timer, optionally with new on/off times.
    ///
    /// Disabling from the timer switch omits the time fields entirely.
    #[serde(rename = "updateTimer")]
    UpdateTimer {
        /// Whether the timer is enabled.
        enabled: bool,

        /// Hour the LEDs switch on.
        #[serde(rename = "onHour", skip_serializing_if = "Option::is_none")]
        on_hour: Option<u8>,

        /// Minute the LEDs switch on.
        #[serde(rename = "onMinute", skip_serializing_if = "Option::is_none")]
        on_minute: Option<u8>,

        /// Hour the LEDs switch off.
        #[serde(rename = "offHour", skip_serializing_if = "Option::is_none")]
        off_hour: Option<u8>,

        /// Minute the LEDs switch off.
        #[serde(rename = "offMinute", skip_serializing_if = "Option::is_none")]
        off_minute: Option<u8>,
    },
}

impl ActionMessage {
    /// Creates a toggle action.
    #[inline]
    #[must_use]
    pub const fn toggle(state: bool) -> Self {
        Self::Toggle { state }
    }

    /// Creates a brightness action.
    #[inline]
    #[must_use]
    pub const fn brightness(value: u8) -> Self {
        Self::Brightness { value }
    }

    /// Creates a timer update without times (`onHour` etc. omitted).
    #[inline]
    #[must_use]
    pub const fn timer_enabled(enabled: bool) -> Self {
        Self::UpdateTimer {
            enabled,
            on_hour: None,
            on_minute: None,
            off_hour: None,
            off_minute: None,
        }
    }

    /// Creates a timer update carrying a full schedule.
    #[must_use]
    pub const fn timer_schedule(enabled: bool, schedule: Schedule) -> Self {
        Self::UpdateTimer {
            enabled,
            on_hour: Some(schedule.on.hour()),
            on_minute: Some(schedule.on.minute()),
            off_hour: Some(schedule.off.hour()),
            off_minute: Some(schedule.off.minute()),
        }
    }

    /// Returns the wire name of the action.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Toggle { .. } => "toggle",
            Self::Brightness { .. } => "brightness",
            Self::UpdateTimer { .. } => "updateTimer",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    use crate::protocol::TimeOfDay;

    fn to_value(message: &ActionMessage) -> Value {
        serde_json::to_value(message).expect("serialize")
    }

    #[test]
    fn test_toggle_format() {
        assert_eq!(
            to_value(&ActionMessage::toggle(true)),
            json!({ "action": "toggle", "state": true })
        );
    }

    #[test]
    fn test_brightness_format() {
        assert_eq!(
            to_value(&ActionMessage::brightness(80)),
            json!({ "action": "brightness", "value": 80 })
        );
    }

    #[test]
    fn test_timer_disable_omits_times() {
        let value = to_value(&ActionMessage::timer_enabled(false));
        assert_eq!(value, json!({ "action": "updateTimer", "enabled": false }));

        let object = value.as_object().expect("object");
        assert!(!object.contains_key("onHour"));
        assert!(!object.contains_key("offMinute"));
    }

    #[test]
    fn test_timer_schedule_format() {
        let schedule = Schedule::new(
            TimeOfDay::new(7, 30).unwrap(),
            TimeOfDay::new(18, 0).unwrap(),
        );
        assert_eq!(
            to_value(&ActionMessage::timer_schedule(true, schedule)),
            json!({
                "action": "updateTimer",
                "enabled": true,
                "onHour": 7,
                "onMinute": 30,
                "offHour": 18,
                "offMinute": 0
            })
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(ActionMessage::toggle(false).name(), "toggle");
        assert_eq!(ActionMessage::brightness(1).name(), "brightness");
        assert_eq!(ActionMessage::timer_enabled(true).name(), "updateTimer");
    }
}
