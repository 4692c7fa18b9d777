//! Seams between the synchronizer and its host.

// ============================================================================
// Imports
// ============================================================================

use tracing::info;

use crate::protocol::ActionMessage;

// ============================================================================
// ActionSink
// ============================================================================

/// Destination for outbound action messages.
///
/// Implemented by [`TransportManager`](crate::transport::TransportManager)
/// and its non-owning [`TransportSink`](crate::transport::TransportSink).
pub trait ActionSink: Send + Sync {
    /// Transmits `message` if possible.
    ///
    /// Returns `false` when the message was dropped.
    fn send(&self, message: ActionMessage) -> bool;
}

// ============================================================================
// Prompt
// ============================================================================

/// Blocking confirmation dialog shown by the host.
///
/// [`ControlPanel`](crate::ControlPanel) calls it with no locks held, so a
/// dialog may stay open while transport events keep updating the controls.
pub trait Prompt: Send + Sync {
    /// Shows `message` and returns once the user dismissed it.
    fn alert(&self, message: &str);
}

/// Prompt that only writes the message to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPrompt;

impl Prompt for LogPrompt {
    fn alert(&self, message: &str) {
        info!(%message, "Prompt");
    }
}
