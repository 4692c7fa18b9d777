//! Control panel façade.
//!
//! Wires the [`TransportManager`] and the [`UiSynchronizer`] together:
//! transport events update the controls, and the synchronizer sends its
//! actions through the transport.
//!
//! The synchronizer holds only a [`TransportSink`], so the event handler
//! installed in the transport never keeps the transport alive. Dropping
//! every panel handle stops the connection.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::panel::{Controls, Prompt, UiEvent, UiSynchronizer};
use crate::protocol::ActionMessage;
use crate::transport::{ConnectionStatus, Endpoint, TransportEvent, TransportManager, TransportSink};

use super::builder::ControlPanelBuilder;
use super::options::PanelOptions;

// ============================================================================
// ControlPanel
// ============================================================================

/// A running control panel for one device.
///
/// # Example
///
/// ```no_run
/// use ledbar_panel::{ControlPanel, UiEvent};
///
/// # async fn example() -> ledbar_panel::Result<()> {
/// let panel = ControlPanel::builder().host("ledbar.local").build()?;
/// panel.start()?;
///
/// panel.dispatch(UiEvent::LedSwitchChanged { checked: true })?;
/// println!("status: {}", panel.controls().ws_status);
///
/// panel.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ControlPanel {
    /// Device connection.
    transport: TransportManager,
    /// Control state (shared with the transport event handler).
    ui: Arc<Mutex<UiSynchronizer>>,
    /// Confirmation dialog, called outside the `ui` lock.
    prompt: Arc<dyn Prompt>,
}

impl fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPanel")
            .field("endpoint", &self.transport.endpoint().as_str())
            .field("status", &self.transport.status())
            .finish_non_exhaustive()
    }
}

impl ControlPanel {
    /// Creates a builder for configuring a panel.
    #[inline]
    #[must_use]
    pub fn builder() -> ControlPanelBuilder {
        ControlPanelBuilder::new()
    }

    /// Creates a panel. Use [`ControlPanel::builder`] instead.
    pub(crate) fn new(endpoint: Endpoint, options: PanelOptions, prompt: Arc<dyn Prompt>) -> Self {
        let transport = TransportManager::with_reconnect_delay(endpoint, options.reconnect_delay);

        let sink: TransportSink = transport.sink();
        let ui = UiSynchronizer::new(Arc::new(sink), Arc::clone(&prompt))
            .with_saved_message(options.saved_message)
            .with_fallback_name(options.fallback_device_name);

        Self {
            transport,
            ui: Arc::new(Mutex::new(ui)),
            prompt,
        }
    }

    /// Installs the event bindings and starts connecting.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) if the panel
    /// was already shut down.
    pub fn start(&self) -> Result<()> {
        let ui = Arc::clone(&self.ui);
        self.transport.set_event_handler(Box::new(move |event| {
            Self::apply_transport_event(&ui, event);
        }));

        self.transport.connect()
    }

    /// Applies a user event.
    ///
    /// Returns the action that was built, if the event produces one. A
    /// confirmation is shown after the control state is unlocked.
    ///
    /// # Errors
    ///
    /// See [`UiSynchronizer::apply`].
    pub fn dispatch(&self, event: UiEvent) -> Result<Option<ActionMessage>> {
        trace!(element = %event.element(), "UI event");
        let reaction = self.ui.lock().apply(event)?;

        if let Some(notice) = &reaction.notice {
            self.prompt.alert(notice);
        }
        Ok(reaction.action)
    }

    /// Returns a copy of the current control state.
    #[must_use]
    pub fn controls(&self) -> Controls {
        self.ui.lock().controls().clone()
    }

    /// Returns the connection status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.transport.status()
    }

    /// Returns the transport manager.
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &TransportManager {
        &self.transport
    }

    /// Stops the transport and detaches the event bindings.
    pub async fn shutdown(&self) {
        self.transport.shutdown().await;
        self.transport.clear_event_handler();
        debug!("Control panel shut down");
    }

    fn apply_transport_event(ui: &Mutex<UiSynchronizer>, event: TransportEvent) {
        match event {
            TransportEvent::Opened => ui.lock().connection_changed(true),
            TransportEvent::Closed => ui.lock().connection_changed(false),
            TransportEvent::Snapshot(snapshot) => ui.lock().render(&snapshot),
            // Already written to the log by the connection
            TransportEvent::DeviceLog(_) => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
