//! WebSocket connection and event loop.
//!
//! One [`Connection::run`] call drives one open socket until it closes.
//!
//! # Event Loop
//!
//! The loop handles:
//!
//! - Incoming text frames from the device (snapshots, log lines)
//! - Outgoing action messages from the panel
//! - The shutdown signal from the transport manager

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::to_string;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use crate::error::Result;
use crate::protocol::{ActionMessage, DeviceSnapshot, InboundMessage};

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream to the device.
pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of [`WsStream`].
type WsWrite = SplitSink<WsStream, Message>;

/// Event handler callback type.
///
/// Called once per [`TransportEvent`], from the transport task, in order.
pub type EventHandler = Box<dyn Fn(TransportEvent) + Send + Sync>;

/// Handler slot shared between the manager and its event loop.
pub(crate) type SharedHandler = Arc<Mutex<Option<EventHandler>>>;

// ============================================================================
// TransportEvent
// ============================================================================

/// Notifications delivered to the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The socket opened.
    Opened,
    /// The socket closed, or a connection attempt failed.
    Closed,
    /// The device pushed a full-state snapshot.
    Snapshot(DeviceSnapshot),
    /// The device mirrored a line of its serial log.
    DeviceLog(String),
}

// ============================================================================
// CloseReason
// ============================================================================

/// Why a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseReason {
    /// Close frame or end of stream from the device.
    Remote,
    /// Socket read or write failed.
    Error,
    /// Connect attempt did not produce a socket.
    Failed,
    /// Intentional teardown.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// Event loop over a single open socket.
pub(crate) struct Connection;

impl Connection {
    /// Runs the socket until it closes or shutdown is requested.
    pub(crate) async fn run(
        ws_stream: WsStream,
        mut outgoing: mpsc::UnboundedReceiver<ActionMessage>,
        event_handler: &SharedHandler,
        shutdown: &mut watch::Receiver<bool>,
    ) -> CloseReason {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        let reason = loop {
            tokio::select! {
                // Incoming frames from the device
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_incoming_message(&text, event_handler);
                        }

                        Some(Ok(Message::Close(frame))) => {
                            debug!(?frame, "WebSocket closed by device");
                            break CloseReason::Remote;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break CloseReason::Error;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break CloseReason::Remote;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Actions from the panel
                action = outgoing.recv() => {
                    let Some(action) = action else {
                        debug!("Outgoing channel closed");
                        let _ = ws_write.close().await;
                        break CloseReason::Shutdown;
                    };

                    if let Err(e) = Self::handle_outgoing(&action, &mut ws_write).await {
                        warn!(action = action.name(), error = %e, "Failed to send action");
                        break CloseReason::Error;
                    }
                }

                () = shutdown_requested(shutdown) => {
                    debug!("Shutdown requested, closing socket");
                    let _ = ws_write.close().await;
                    break CloseReason::Shutdown;
                }
            }
        };

        debug!(?reason, "Event loop terminated");
        reason
    }

    /// Decodes an incoming text frame and forwards it to the handler.
    fn handle_incoming_message(text: &str, event_handler: &SharedHandler) {
        match InboundMessage::decode(text) {
            Ok(InboundMessage::Update(snapshot)) => {
                trace!(?snapshot, "Snapshot received");
                emit(event_handler, TransportEvent::Snapshot(snapshot));
            }

            Ok(InboundMessage::Log(line)) => {
                debug!(target: "ledbar_panel::device", "{line}");
                emit(event_handler, TransportEvent::DeviceLog(line));
            }

            Ok(InboundMessage::Ignored { action }) => {
                debug!(%action, "Ignoring message with unhandled action");
            }

            Err(e) => {
                warn!(error = %e, text = %text, "Dropping undecodable frame");
            }
        }
    }

    /// Serializes and transmits one action.
    async fn handle_outgoing(action: &ActionMessage, ws_write: &mut WsWrite) -> Result<()> {
        let json = to_string(action)?;
        ws_write.send(Message::Text(json.into())).await?;
        trace!(action = action.name(), "Action sent");
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Invokes the installed handler, if any.
pub(crate) fn emit(event_handler: &SharedHandler, event: TransportEvent) {
    let handler = event_handler.lock();
    if let Some(ref handler) = *handler {
        handler(event);
    }
}

/// Resolves once shutdown is signalled or the signal sender is gone.
pub(crate) async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
