//! LED bar control panel - WebSocket client for the LED bar device.
//!
//! This library keeps a model of the device's control page in sync with
//! the device and turns user interactions into device commands.
//!
//! # Architecture
//!
//! Two cooperating parts, wired by [`ControlPanel`]:
//!
//! - **Transport** ([`TransportManager`]): one WebSocket to
//!   `ws://<host>/ws`, reconnected after a fixed delay whenever it closes
//! - **UI synchronizer** ([`UiSynchronizer`]): renders device snapshots
//!   into [`Controls`], turns [`UiEvent`]s into [`ActionMessage`]s
//!
//! Actions are sent only while the socket is open; otherwise they are
//! dropped. There is no queue and no acknowledgement.
//!
//! # Quick Start
//!
//! ```no_run
//! use ledbar_panel::{ControlPanel, Result, UiEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let panel = ControlPanel::builder()
//!         .host("ledbar.local")
//!         .build()?;
//!
//!     panel.start()?;
//!
//!     // Switch the LEDs on and dim them
//!     panel.dispatch(UiEvent::LedSwitchChanged { checked: true })?;
//!     panel.dispatch(UiEvent::BrightnessChanged { value: 40 })?;
//!
//!     println!("{}", panel.controls().ws_status);
//!     panel.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`app`] | [`ControlPanel`], builder and options |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`panel`] | Control model and UI synchronizer |
//! | [`protocol`] | JSON message types |
//! | [`transport`] | Reconnecting WebSocket transport |

// ============================================================================
// Modules
// ============================================================================

/// Control panel entry point.
///
/// Use [`ControlPanel::builder()`] to create a configured panel.
pub mod app;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Control model and UI synchronizer.
pub mod panel;

/// WebSocket protocol message types.
pub mod protocol;

/// Reconnecting WebSocket transport.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// App types
pub use app::{ControlPanel, ControlPanelBuilder, PanelOptions};

// Error types
pub use error::{Error, Result};

// Panel types
pub use panel::{
    ActionSink, ControlValue, Controls, ElementId, LogPrompt, Prompt, Reaction, UiEvent,
    UiSynchronizer,
};

// Protocol types
pub use protocol::{ActionMessage, DeviceSnapshot, InboundMessage, Schedule, TimeOfDay};

// Transport types
pub use transport::{
    ConnectionState, ConnectionStatus, Endpoint, TransportEvent, TransportManager, TransportSink,
};
