//! WebSocket transport layer.
//!
//! This module owns the single connection between the panel and the device.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                         ┌─────────────────┐
//! │  TransportManager    │        WebSocket        │  LED bar        │
//! │   supervisor task    │◄───────────────────────►│  firmware       │
//! │   → Connection loop  │     ws://<host>/ws      │                 │
//! └──────────────────────┘                         └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `TransportManager::connect` - Spawn the supervisor
//! 2. `connect_async` - Open the socket (status `Connecting` → `Open`)
//! 3. `Connection::run` - Decode frames, transmit actions
//! 4. Close or error - status `Closed`, one reconnect after the fixed delay
//! 5. `TransportManager::shutdown` - Close the socket, cancel the reconnect
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Per-socket event loop |
//! | `endpoint` | `ws://<host>/ws` derivation |
//! | `manager` | Reconnect supervisor and send path |
//! | `state` | Connection status |

// ============================================================================
// Submodules
// ============================================================================

/// Per-socket event loop.
pub mod connection;

/// Device endpoint URL.
pub mod endpoint;

/// Reconnecting transport manager.
pub mod manager;

/// Connection status.
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{EventHandler, TransportEvent};
pub use endpoint::{DEFAULT_HOST, DEFAULT_PATH, Endpoint};
pub use manager::{DEFAULT_RECONNECT_DELAY, TransportManager, TransportSink};
pub use state::{ConnectionState, ConnectionStatus};
