//! Builder pattern for control panel configuration.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ledbar_panel::ControlPanel;
//!
//! # fn example() -> ledbar_panel::Result<()> {
//! let panel = ControlPanel::builder()
//!     .host("192.168.1.40")
//!     .reconnect_delay(Duration::from_secs(2))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::panel::{LogPrompt, Prompt};
use crate::transport::{DEFAULT_HOST, Endpoint};

use super::core::ControlPanel;
use super::options::PanelOptions;

// ============================================================================
// ControlPanelBuilder
// ============================================================================

/// Builder for configuring a [`ControlPanel`].
///
/// Use [`ControlPanel::builder()`] to create a new builder.
#[derive(Clone, Default)]
pub struct ControlPanelBuilder {
    /// Device host, `host[:port]`.
    host: Option<String>,
    /// Panel options.
    options: PanelOptions,
    /// Confirmation dialog.
    prompt: Option<Arc<dyn Prompt>>,
}

impl fmt::Debug for ControlPanelBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPanelBuilder")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("prompt", &self.prompt.is_some())
            .finish()
    }
}

// ============================================================================
// ControlPanelBuilder Implementation
// ============================================================================

impl ControlPanelBuilder {
    /// Creates a builder with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device host the page was served from.
    ///
    /// Defaults to `ledbar.local`, the name the firmware advertises over mDNS.
    ///
    /// # Arguments
    ///
    /// * `host` - Host name or IP, optionally with `:port`
    #[inline]
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the WebSocket path (default `/ws`).
    #[inline]
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.options.path = path.into();
        self
    }

    /// Sets the fixed reconnect delay (default 2 s).
    #[inline]
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.options.reconnect_delay = delay;
        self
    }

    /// Sets the confirmation dialog (default: log only).
    #[inline]
    #[must_use]
    pub fn prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: PanelOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the panel with validation.
    ///
    /// The panel does not connect until [`ControlPanel::start`].
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) if the host or options are unusable
    /// - [`Error::Url`](crate::Error::Url) if the endpoint URL does not parse
    pub fn build(self) -> Result<ControlPanel> {
        self.options.validate()?;

        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let endpoint = Endpoint::with_path(host, &self.options.path)?;
        let prompt = self.prompt.unwrap_or_else(|| Arc::new(LogPrompt));

        Ok(ControlPanel::new(endpoint, self.options, prompt))
    }
}

// ============================================================================
// Tests
// ============================================================================
