//! UI synchronizer and control model.
//!
//! The panel is a flat translation layer:
//!
//! ```text
//!   UiEvent ──► UiSynchronizer ──► ActionMessage ──► ActionSink (transport)
//!                     ▲
//!   DeviceSnapshot ───┘──► Controls ──► host renders
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `controls` | Control state and element IDs |
//! | `event` | User events |
//! | `sink` | `ActionSink` and `Prompt` seams |
//! | `synchronizer` | Snapshot rendering and event handling |

// ============================================================================
// Submodules
// ============================================================================

/// Control state addressed by element ID.
pub mod controls;

/// User events raised by controls.
pub mod event;

/// Outbound and prompt seams.
pub mod sink;

/// Snapshot rendering and event handling.
pub mod synchronizer;

// ============================================================================
// Re-exports
// ============================================================================

pub use controls::{
    ControlValue, Controls, DEFAULT_DEVICE_NAME, ElementId, STATUS_CONNECTED, STATUS_CONNECTING,
    STATUS_DISCONNECTED,
};
pub use event::UiEvent;
pub use sink::{ActionSink, LogPrompt, Prompt};
pub use synchronizer::{DEFAULT_SAVED_MESSAGE, Reaction, UiSynchronizer};
