//! User events raised by the panel controls.

// ============================================================================
// Imports
// ============================================================================

use super::controls::ElementId;

// ============================================================================
// UiEvent
// ============================================================================

/// A user interaction on one of the panel controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `ledSwitch` change.
    LedSwitchChanged {
        /// New checkbox state.
        checked: bool,
    },

    /// `brightnessSlider` input while dragging.
    BrightnessInput {
        /// Current slider position.
        value: u8,
    },

    /// `brightnessSlider` change on release.
    BrightnessChanged {
        /// Final slider position.
        value: u8,
    },

    /// `timerSwitch` change.
    TimerSwitchChanged {
        /// New checkbox state.
        checked: bool,
    },

    /// `onTime` edited.
    OnTimeEdited(String),

    /// `offTime` edited.
    OffTimeEdited(String),

    /// `saveTimerBtn` click.
    SaveTimerClicked,
}

impl UiEvent {
    /// Returns the element that raised the event.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        match self {
            Self::LedSwitchChanged { .. } => ElementId::LedSwitch,
            Self::BrightnessInput { .. } | Self::BrightnessChanged { .. } => {
                ElementId::BrightnessSlider
            }
            Self::TimerSwitchChanged { .. } => ElementId::TimerSwitch,
            Self::OnTimeEdited(_) => ElementId::OnTime,
            Self::OffTimeEdited(_) => ElementId::OffTime,
            Self::SaveTimerClicked => ElementId::SaveTimerBtn,
        }
    }
}
