//! In-process fake device for transport tests.
//!
//! Serves one WebSocket client at a time on `127.0.0.1:<random>`, records
//! every text frame it receives and lets tests push frames or close the
//! socket.

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

// ============================================================================
// Constants
// ============================================================================

/// How long `next_frame` waits before giving up.
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// DeviceCommand
// ============================================================================

enum DeviceCommand {
    Send(String),
    Close,
}

// ============================================================================
// FakeDevice
// ============================================================================

pub(crate) struct FakeDevice {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    frames_rx: mpsc::UnboundedReceiver<String>,
    command_tx: mpsc::UnboundedSender<DeviceCommand>,
}

impl FakeDevice {
    /// Starts a device that serves every connection.
    pub(crate) async fn start() -> Self {
        Self::start_dropping(0).await
    }

    /// Starts a device that drops the first `drop_first` TCP connections
    /// before the WebSocket handshake.
    pub(crate) async fn start_dropping(drop_first: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake device");
        let addr = listener.local_addr().expect("local addr");

        let accepted = Arc::new(AtomicUsize::new(0));
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::run(
            listener,
            Arc::clone(&accepted),
            drop_first,
            frames_tx,
            command_rx,
        ));

        Self {
            addr,
            accepted,
            frames_rx,
            command_tx,
        }
    }

    /// Returns `127.0.0.1:<port>`.
    pub(crate) fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Returns the number of TCP connections accepted so far.
    pub(crate) fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Sends a text frame to the connected client.
    pub(crate) fn push(&self, text: impl Into<String>) {
        let _ = self.command_tx.send(DeviceCommand::Send(text.into()));
    }

    /// Closes the connected client's socket.
    pub(crate) fn close_client(&self) {
        let _ = self.command_tx.send(DeviceCommand::Close);
    }

    /// Waits for the next frame and decodes it as JSON.
    pub(crate) async fn next_frame(&mut self) -> Option<Value> {
        let text = timeout(FRAME_TIMEOUT, self.frames_rx.recv()).await.ok()??;
        serde_json::from_str(&text).ok()
    }

    /// Asserts that no frame arrives within `wait`.
    pub(crate) async fn assert_no_frame(&mut self, wait: Duration) {
        if let Ok(Some(frame)) = timeout(wait, self.frames_rx.recv()).await {
            panic!("Unexpected frame: {frame}");
        }
    }

    async fn run(
        listener: TcpListener,
        accepted: Arc<AtomicUsize>,
        drop_first: usize,
        frames_tx: mpsc::UnboundedSender<String>,
        mut command_rx: mpsc::UnboundedReceiver<DeviceCommand>,
    ) {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };

            let count = accepted.fetch_add(1, Ordering::SeqCst) + 1;
            if count <= drop_first {
                drop(stream);
                continue;
            }

            let Ok(mut ws) = accept_async(stream).await else {
                continue;
            };

            loop {
                tokio::select! {
                    message = ws.next() => match message {
                        Some(Ok(Message::Text(text))) => {
                            let _ = frames_tx.send(text.as_str().to_owned());
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        _ => {}
                    },

                    command = command_rx.recv() => match command {
                        Some(DeviceCommand::Send(text)) => {
                            let _ = ws.send(Message::Text(text.into())).await;
                        }
                        Some(DeviceCommand::Close) => {
                            let _ = ws.close(None).await;
                            break;
                        }
                        None => return,
                    },
                }
            }
        }
    }
}
