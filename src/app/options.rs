//! Control panel options.
//!
//! Plain settings with sensible defaults for everything except the device
//! host, which lives on the builder.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use ledbar_panel::PanelOptions;
//!
//! let options = PanelOptions::new()
//!     .with_reconnect_delay(Duration::from_secs(5))
//!     .with_saved_message("Timer updated");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};
use crate::panel::{DEFAULT_DEVICE_NAME, DEFAULT_SAVED_MESSAGE};
use crate::transport::{DEFAULT_PATH, DEFAULT_RECONNECT_DELAY};

// ============================================================================
// PanelOptions
// ============================================================================

/// Tunables of a [`ControlPanel`](super::ControlPanel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    /// WebSocket path on the device.
    pub path: String,

    /// Fixed delay between a close and the next connection attempt.
    pub reconnect_delay: Duration,

    /// Confirmation shown after the timer schedule was sent.
    pub saved_message: String,

    /// Heading shown when the device reports no name.
    pub fallback_device_name: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            saved_message: DEFAULT_SAVED_MESSAGE.to_string(),
            fallback_device_name: DEFAULT_DEVICE_NAME.to_string(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl PanelOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the WebSocket path.
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the reconnect delay.
    #[inline]
    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Sets the save confirmation text.
    #[inline]
    #[must_use]
    pub fn with_saved_message(mut self, message: impl Into<String>) -> Self {
        self.saved_message = message.into();
        self
    }

    /// Sets the fallback device name.
    #[inline]
    #[must_use]
    pub fn with_fallback_device_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_device_name = name.into();
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl PanelOptions {
    /// Checks that the options can drive a panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the reconnect delay is zero or the path
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.reconnect_delay.is_zero() {
            return Err(Error::config(
                "Reconnect delay must be non-zero. Use .reconnect_delay() to set it.",
            ));
        }
        if self.path.trim().is_empty() {
            return Err(Error::config("WebSocket path must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
