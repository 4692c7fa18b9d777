//! Error types for the LED bar control panel.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use ledbar_panel::{ControlPanel, Result, UiEvent};
//!
//! fn example(panel: &ControlPanel) -> Result<()> {
//!     panel.dispatch(UiEvent::SaveTimerClicked)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Decode`] |
//! | Input | [`Error::InvalidTime`], [`Error::InvalidArgument`] |
//! | External | [`Error::Json`], [`Error::WebSocket`], [`Error::Url`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;
use url::ParseError as UrlError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the panel builder is given an unusable setting.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// WebSocket connection closed.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Inbound frame could not be decoded into a known message.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of what was wrong with the frame.
        message: String,
    },

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Time input is not a valid `HH:MM` value.
    #[error("Invalid time: {input:?}")]
    InvalidTime {
        /// The rejected text.
        input: String,
    },

    /// A control produced a value outside its allowed range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Endpoint URL error.
    #[error("URL error: {0}")]
    Url(#[from] UrlError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an invalid time error.
    #[inline]
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTime {
            input: input.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if an inbound frame failed to decode.
    #[inline]
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Json(_))
    }

    /// Returns `true` if the error came from user input on a control.
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidTime { .. } | Self::InvalidArgument { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
