//! WebSocket protocol message types.
//!
//! This module defines the JSON text frames exchanged with the device.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `ActionMessage` | Panel → Device | Single-purpose command |
//! | `InboundMessage::Update` | Device → Panel | Full-state snapshot |
//! | `InboundMessage::Log` | Device → Panel | Mirrored serial log line |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `action` | Outbound action messages |
//! | `snapshot` | Inbound snapshot decoding |
//! | `time` | `HH:MM` time values and schedules |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound action messages.
pub mod action;

/// Inbound snapshot and log frames.
pub mod snapshot;

/// Time-of-day values and timer schedules.
pub mod time;

// ============================================================================
// Re-exports
// ============================================================================

pub use action::ActionMessage;
pub use snapshot::{DeviceSnapshot, InboundMessage, MAX_BRIGHTNESS, UPDATE_ACTION};
pub use time::{Schedule, TimeOfDay};
