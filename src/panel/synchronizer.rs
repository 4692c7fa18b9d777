//! UI synchronizer.
//!
//! Projects device snapshots onto [`Controls`] and turns [`UiEvent`]s into
//! [`ActionMessage`]s for the [`ActionSink`].
//!
//! # Event Reactions
//!
//! | Event | Local effect | Sent |
//! |-------|--------------|------|
//! | LED switch change | checkbox | `toggle` |
//! | Slider input | slider, label | nothing |
//! | Slider change | slider, label | `brightness` |
//! | Timer switch on | checkbox, panel shown | nothing |
//! | Timer switch off | checkbox, panel hidden | `updateTimer` without times |
//! | Save click | prompt | `updateTimer` with times |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::protocol::{ActionMessage, DeviceSnapshot, MAX_BRIGHTNESS, Schedule, TimeOfDay};

use super::controls::{
    Controls, DEFAULT_DEVICE_NAME, STATUS_CONNECTED, STATUS_DISCONNECTED,
};
use super::event::UiEvent;
use super::sink::{ActionSink, Prompt};

// ============================================================================
// Constants
// ============================================================================

/// Confirmation shown after the schedule was sent.
pub const DEFAULT_SAVED_MESSAGE: &str = "Schedule saved!";

// ============================================================================
// Reaction
// ============================================================================

/// What a user event produced, besides the local control changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reaction {
    /// Action built for the device, whether or not the sink accepted it.
    pub action: Option<ActionMessage>,
    /// Confirmation still to be shown to the user.
    pub notice: Option<String>,
}

impl Reaction {
    fn local() -> Self {
        Self::default()
    }

    fn sent(action: ActionMessage) -> Self {
        Self {
            action: Some(action),
            notice: None,
        }
    }
}

// ============================================================================
// UiSynchronizer
// ============================================================================

/// Keeps [`Controls`] in sync with the device.
pub struct UiSynchronizer {
    controls: Controls,
    sink: Arc<dyn ActionSink>,
    prompt: Arc<dyn Prompt>,
    saved_message: String,
    fallback_name: String,
}

impl fmt::Debug for UiSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiSynchronizer")
            .field("controls", &self.controls)
            .field("saved_message", &self.saved_message)
            .finish_non_exhaustive()
    }
}

impl UiSynchronizer {
    /// Creates a synchronizer with default controls.
    #[must_use]
    pub fn new(sink: Arc<dyn ActionSink>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            controls: Controls::default(),
            sink,
            prompt,
            saved_message: DEFAULT_SAVED_MESSAGE.to_string(),
            fallback_name: DEFAULT_DEVICE_NAME.to_string(),
        }
    }

    /// Sets the text of the save confirmation.
    #[must_use]
    pub fn with_saved_message(mut self, message: impl Into<String>) -> Self {
        self.saved_message = message.into();
        self
    }

    /// Sets the heading used when the device reports no name.
    #[must_use]
    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self.controls.device_name.clone_from(&self.fallback_name);
        self
    }

    /// Returns the current control state.
    #[inline]
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Rewrites every bound control from `snapshot`.
    pub fn render(&mut self, snapshot: &DeviceSnapshot) {
        let controls = &mut self.controls;

        controls.device_name = snapshot
            .device_name
            .clone()
            .unwrap_or_else(|| self.fallback_name.clone());

        controls.led_switch = snapshot.led_state;

        controls.brightness_slider = snapshot.brightness;
        controls.brightness_value = snapshot.brightness.to_string();
        controls.brightness_slider_disabled = !snapshot.led_state;

        controls.timer_switch = snapshot.timer_enabled;
        controls.timer_settings_visible = snapshot.timer_enabled;

        controls.on_time = snapshot.schedule.on.to_string();
        controls.off_time = snapshot.schedule.off.to_string();

        trace!(?snapshot, "Rendered snapshot");
    }

    /// Updates the status indicator.
    pub fn connection_changed(&mut self, connected: bool) {
        let text = if connected {
            STATUS_CONNECTED
        } else {
            STATUS_DISCONNECTED
        };
        self.controls.ws_status = text.to_string();
    }

    /// Applies a user event, forwards the resulting action and shows any
    /// confirmation on the prompt.
    ///
    /// Returns the action that was built, whether or not the sink accepted
    /// it. Events with only a local effect return `None`.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn handle(&mut self, event: UiEvent) -> Result<Option<ActionMessage>> {
        let reaction = self.apply(event)?;
        if let Some(notice) = &reaction.notice {
            self.prompt.alert(notice);
        }
        Ok(reaction.action)
    }

    /// Applies a user event and forwards the resulting action, leaving the
    /// confirmation to the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if a slider value exceeds 100
    /// - [`Error::InvalidTime`] if a time input does not parse on save
    pub fn apply(&mut self, event: UiEvent) -> Result<Reaction> {
        match event {
            UiEvent::LedSwitchChanged { checked } => {
                self.controls.led_switch = checked;
                Ok(Reaction::sent(self.dispatch(ActionMessage::toggle(checked))))
            }

            UiEvent::BrightnessInput { value } => {
                self.set_brightness(value)?;
                Ok(Reaction::local())
            }

            UiEvent::BrightnessChanged { value } => {
                self.set_brightness(value)?;
                Ok(Reaction::sent(self.dispatch(ActionMessage::brightness(value))))
            }

            UiEvent::TimerSwitchChanged { checked } => {
                self.controls.timer_switch = checked;
                self.controls.timer_settings_visible = checked;
                if checked {
                    Ok(Reaction::local())
                } else {
                    Ok(Reaction::sent(
                        self.dispatch(ActionMessage::timer_enabled(false)),
                    ))
                }
            }

            UiEvent::OnTimeEdited(text) => {
                self.controls.on_time = text;
                Ok(Reaction::local())
            }

            UiEvent::OffTimeEdited(text) => {
                self.controls.off_time = text;
                Ok(Reaction::local())
            }

            UiEvent::SaveTimerClicked => {
                let schedule = Schedule::new(
                    TimeOfDay::parse(&self.controls.on_time)?,
                    TimeOfDay::parse(&self.controls.off_time)?,
                );
                let message = self.dispatch(ActionMessage::timer_schedule(
                    self.controls.timer_switch,
                    schedule,
                ));
                Ok(Reaction {
                    action: Some(message),
                    notice: Some(self.saved_message.clone()),
                })
            }
        }
    }

    fn set_brightness(&mut self, value: u8) -> Result<()> {
        if value > MAX_BRIGHTNESS {
            return Err(Error::invalid_argument(format!(
                "brightness {value} exceeds {MAX_BRIGHTNESS}"
            )));
        }
        self.controls.brightness_slider = value;
        self.controls.brightness_value = value.to_string();
        Ok(())
    }

    fn dispatch(&self, message: ActionMessage) -> ActionMessage {
        if !self.sink.send(message.clone()) {
            debug!(action = message.name(), "Action dropped, device not connected");
        }
        message
    }
}

// ============================================================================
// Tests
// ============================================================================
