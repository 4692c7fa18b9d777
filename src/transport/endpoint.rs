//! Device WebSocket endpoint.
//!
//! The device serves its socket at `ws://<host>/ws`, where `<host>` is the
//! address the control page was loaded from (optionally with a port).

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Path of the device socket.
pub const DEFAULT_PATH: &str = "/ws";

/// mDNS name the firmware advertises.
pub const DEFAULT_HOST: &str = "ledbar.local";

// ============================================================================
// Endpoint
// ============================================================================

/// Validated WebSocket URL of the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Derives the endpoint from a host with the default `/ws` path.
    ///
    /// # Errors
    ///
    /// See [`Endpoint::with_path`].
    pub fn from_host(host: &str) -> Result<Self> {
        Self::with_path(host, DEFAULT_PATH)
    }

    /// Derives the endpoint from a host and socket path.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the host is empty or carries a scheme/path
    /// - [`Error::Url`] if the resulting URL does not parse
    pub fn with_path(host: &str, path: &str) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::config("device host must not be empty"));
        }
        if host.contains("://") || host.contains('/') {
            return Err(Error::config(format!(
                "device host must be a bare host[:port], got {host:?}"
            )));
        }

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let url = Url::parse(&format!("ws://{host}{path}"))?;
        if url.host_str().is_none() {
            return Err(Error::config(format!("no host in {url}")));
        }

        Ok(Self { url })
    }

    /// Returns the full URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the URL as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host() {
        let endpoint = Endpoint::from_host("ledbar.local").unwrap();
        assert_eq!(endpoint.as_str(), "ws://ledbar.local/ws");
    }

    #[test]
    fn test_host_with_port() {
        let endpoint = Endpoint::from_host("127.0.0.1:8080").unwrap();
        assert_eq!(endpoint.as_str(), "ws://127.0.0.1:8080/ws");
        assert_eq!(endpoint.url().port(), Some(8080));
    }

    #[test]
    fn test_custom_path_without_slash() {
        let endpoint = Endpoint::with_path("192.168.1.40", "socket").unwrap();
        assert_eq!(endpoint.to_string(), "ws://192.168.1.40/socket");
    }

    #[test]
    fn test_rejects_empty_host() {
        assert!(matches!(
            Endpoint::from_host("  "),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_url_as_host() {
        assert!(matches!(
            Endpoint::from_host("ws://ledbar.local/ws"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(matches!(
            Endpoint::from_host("ledbar.local:99999"),
            Err(Error::Url(_))
        ));
    }
}
