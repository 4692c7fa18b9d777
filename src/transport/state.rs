//! Connection status tracking.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use super::endpoint::Endpoint;

// ============================================================================
// ConnectionStatus
// ============================================================================

/// Lifecycle status of the device connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    /// A connection attempt is in flight.
    Connecting,
    /// The socket is open; actions are transmitted.
    Open,
    /// No socket; actions are dropped.
    #[default]
    Closed,
}

impl ConnectionStatus {
    /// Returns `true` if actions would be transmitted.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ConnectionState
// ============================================================================

/// Point-in-time view of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
    /// Device endpoint.
    pub endpoint: Endpoint,
    /// Current status.
    pub status: ConnectionStatus,
    /// Connection attempts made so far, including the first.
    pub attempts: u64,
}

// ============================================================================
// Tests
// ============================================================================
