//! Form control model.
//!
//! [`Controls`] mirrors the controls of the panel page. The host renders
//! it; the synchronizer writes it. Controls are addressed by the element
//! IDs of the page via [`ElementId`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Status indicator text while the socket is open.
pub const STATUS_CONNECTED: &str = "Connected";

/// Status indicator text after the socket closed.
pub const STATUS_DISCONNECTED: &str = "Disconnected";

/// Status indicator text before the first open/close.
pub const STATUS_CONNECTING: &str = "Connecting...";

/// Heading shown when the device reports no name.
pub const DEFAULT_DEVICE_NAME: &str = "LED Bar Control";

// ============================================================================
// ElementId
// ============================================================================

/// IDs of the page elements the panel reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Connection status label.
    WsStatus,
    /// Device name heading.
    DeviceName,
    /// LED power checkbox.
    LedSwitch,
    /// Brightness range input.
    BrightnessSlider,
    /// Brightness numeric label.
    BrightnessValue,
    /// Timer enable checkbox.
    TimerSwitch,
    /// Timer settings panel.
    TimerSettings,
    /// Timer on-time text input.
    OnTime,
    /// Timer off-time text input.
    OffTime,
    /// Save-timer button.
    SaveTimerBtn,
}

impl ElementId {
    /// Every element, in page order.
    pub const ALL: [Self; 10] = [
        Self::WsStatus,
        Self::DeviceName,
        Self::LedSwitch,
        Self::BrightnessSlider,
        Self::BrightnessValue,
        Self::TimerSwitch,
        Self::TimerSettings,
        Self::OnTime,
        Self::OffTime,
        Self::SaveTimerBtn,
    ];

    /// Returns the DOM id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WsStatus => "ws-status",
            Self::DeviceName => "deviceName",
            Self::LedSwitch => "ledSwitch",
            Self::BrightnessSlider => "brightnessSlider",
            Self::BrightnessValue => "brightnessValue",
            Self::TimerSwitch => "timerSwitch",
            Self::TimerSettings => "timerSettings",
            Self::OnTime => "onTime",
            Self::OffTime => "offTime",
            Self::SaveTimerBtn => "saveTimerBtn",
        }
    }

    /// Looks up an element by DOM id.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|element| element.as_str() == id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ControlValue
// ============================================================================

/// Current value of one element, as the host should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    /// Text content or text input value.
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Range input.
    Range {
        /// Slider position.
        value: u8,
        /// Whether the slider accepts input.
        disabled: bool,
    },
    /// Container visibility.
    Visible(bool),
    /// Button with no state.
    Button,
}

// ============================================================================
// Controls
// ============================================================================

/// State of every control on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// `ws-status` text.
    pub ws_status: String,
    /// `deviceName` text.
    pub device_name: String,
    /// `ledSwitch` checked.
    pub led_switch: bool,
    /// `brightnessSlider` value.
    pub brightness_slider: u8,
    /// `brightnessSlider` disabled.
    pub brightness_slider_disabled: bool,
    /// `brightnessValue` text.
    pub brightness_value: String,
    /// `timerSwitch` checked.
    pub timer_switch: bool,
    /// `timerSettings` shown.
    pub timer_settings_visible: bool,
    /// `onTime` input text.
    pub on_time: String,
    /// `offTime` input text.
    pub off_time: String,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            ws_status: STATUS_CONNECTING.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            led_switch: false,
            brightness_slider: 100,
            brightness_slider_disabled: false,
            brightness_value: "100".to_string(),
            timer_switch: false,
            timer_settings_visible: false,
            on_time: "20:00".to_string(),
            off_time: "06:00".to_string(),
        }
    }
}

impl Controls {
    /// Returns the value of one element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> ControlValue {
        match id {
            ElementId::WsStatus => ControlValue::Text(self.ws_status.clone()),
            ElementId::DeviceName => ControlValue::Text(self.device_name.clone()),
            ElementId::LedSwitch => ControlValue::Checked(self.led_switch),
            ElementId::BrightnessSlider => ControlValue::Range {
                value: self.brightness_slider,
                disabled: self.brightness_slider_disabled,
            },
            ElementId::BrightnessValue => ControlValue::Text(self.brightness_value.clone()),
            ElementId::TimerSwitch => ControlValue::Checked(self.timer_switch),
            ElementId::TimerSettings => ControlValue::Visible(self.timer_settings_visible),
            ElementId::OnTime => ControlValue::Text(self.on_time.clone()),
            ElementId::OffTime => ControlValue::Text(self.off_time.clone()),
            ElementId::SaveTimerBtn => ControlValue::Button,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_ids() {
        assert_eq!(ElementId::WsStatus.as_str(), "ws-status");
        assert_eq!(ElementId::BrightnessSlider.as_str(), "brightnessSlider");
        assert_eq!(ElementId::SaveTimerBtn.to_string(), "saveTimerBtn");
    }

    #[test]
    fn test_from_dom_id_round_trips_every_element() {
        for element in ElementId::ALL {
            assert_eq!(ElementId::from_dom_id(element.as_str()), Some(element));
        }
        assert_eq!(ElementId::from_dom_id("unknown"), None);
    }

    #[test]
    fn test_default_controls() {
        let controls = Controls::default();
        assert_eq!(controls.ws_status, STATUS_CONNECTING);
        assert_eq!(controls.device_name, DEFAULT_DEVICE_NAME);
        assert!(!controls.timer_settings_visible);
    }

    #[test]
    fn test_get() {
        let controls = Controls {
            brightness_slider: 30,
            brightness_slider_disabled: true,
            ..Controls::default()
        };
        assert_eq!(
            controls.get(ElementId::BrightnessSlider),
            ControlValue::Range {
                value: 30,
                disabled: true
            }
        );
        assert_eq!(
            controls.get(ElementId::TimerSettings),
            ControlValue::Visible(false)
        );
        assert_eq!(controls.get(ElementId::SaveTimerBtn), ControlValue::Button);
    }
}
