//! Reconnecting transport manager.
//!
//! [`TransportManager`] owns the device connection. A supervisor task opens
//! the socket, runs it until it closes, then waits a fixed delay and tries
//! again, forever, until [`TransportManager::shutdown`] is called.
//!
//! ```text
//!   connect()
//!      │
//!      ▼
//!  Connecting ──ok──► Open ──close/error──┐
//!      │                                  ▼
//!      └──────────fail──────────────────► Closed ──delay──► Connecting
//! ```
//!
//! Exactly one reconnect sleep is pending after each close, and the sleep
//! is cancelled by shutdown. Dropping the last [`TransportManager`] handle
//! has the same effect as calling shutdown.

// ============================================================================
// Imports
// ============================================================================

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::panel::ActionSink;
use crate::protocol::ActionMessage;

use super::connection::{
    CloseReason, Connection, EventHandler, SharedHandler, TransportEvent, WsStream, emit,
    shutdown_requested,
};
use super::endpoint::Endpoint;
use super::state::{ConnectionState, ConnectionStatus};

// ============================================================================
// Constants
// ============================================================================

/// Delay between a close and the next connection attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

// ============================================================================
// ManagerInner
// ============================================================================

/// State shared between manager handles and the supervisor task.
///
/// Holds no teardown signal, so the supervisor keeping it alive never keeps
/// itself running.
struct ManagerInner {
    /// Device endpoint.
    endpoint: Endpoint,
    /// Fixed delay before each reconnect.
    reconnect_delay: Duration,
    /// Current status; receivers are handed out by `wait_for_status`.
    status_tx: watch::Sender<ConnectionStatus>,
    /// Sender into the live connection's event loop, if one is open.
    outgoing: Mutex<Option<mpsc::UnboundedSender<ActionMessage>>>,
    /// Event handler (shared with the event loop).
    event_handler: SharedHandler,
    /// Connection attempts made so far.
    attempts: AtomicU64,
}

impl ManagerInner {
    fn status(&self) -> ConnectionStatus {
        *self.status_tx.borrow()
    }

    fn send(&self, message: ActionMessage) -> bool {
        if !self.status().is_open() {
            trace!(action = message.name(), "Connection not open, dropping action");
            return false;
        }

        let outgoing = self.outgoing.lock();
        match outgoing.as_ref() {
            Some(tx) => tx.send(message).is_ok(),
            None => false,
        }
    }

    fn set_status(&self, status: ConnectionStatus) {
        let previous = self.status_tx.send_replace(status);
        if previous != status {
            trace!(%previous, %status, "Connection status changed");
        }
    }

    /// Publishes an open socket and runs it to completion.
    async fn serve(
        &self,
        ws_stream: WsStream,
        shutdown: &mut watch::Receiver<bool>,
    ) -> CloseReason {
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        *self.outgoing.lock() = Some(outgoing_tx);

        self.set_status(ConnectionStatus::Open);
        info!(endpoint = %self.endpoint, "Connected");
        emit(&self.event_handler, TransportEvent::Opened);

        let reason = Connection::run(ws_stream, outgoing_rx, &self.event_handler, shutdown).await;

        // Actions sent from here on are dropped, never carried to the next socket
        self.outgoing.lock().take();
        reason
    }

    /// Connect, serve, wait, repeat.
    async fn run_supervisor(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        loop {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            self.set_status(ConnectionStatus::Connecting);
            debug!(endpoint = %self.endpoint, attempt, "Opening WebSocket connection");

            let connect = tokio_tungstenite::connect_async(self.endpoint.as_str());
            let result = tokio::select! {
                result = connect => result,
                () = shutdown_requested(&mut shutdown) => break,
            };

            let reason = match result {
                Ok((ws_stream, _response)) => self.serve(ws_stream, &mut shutdown).await,
                Err(e) => {
                    warn!(endpoint = %self.endpoint, attempt, error = %e, "Connection attempt failed");
                    CloseReason::Failed
                }
            };

            self.set_status(ConnectionStatus::Closed);
            info!(endpoint = %self.endpoint, ?reason, "Disconnected");
            emit(&self.event_handler, TransportEvent::Closed);

            if reason == CloseReason::Shutdown {
                break;
            }

            debug!(
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Reconnect scheduled"
            );
            tokio::select! {
                () = sleep(self.reconnect_delay) => {}
                () = shutdown_requested(&mut shutdown) => break,
            }
        }

        self.set_status(ConnectionStatus::Closed);
        debug!("Transport supervisor stopped");
    }
}

// ============================================================================
// ManagerControl
// ============================================================================

/// Teardown signal and supervisor handle, owned by user-facing handles only.
///
/// Dropping it drops `shutdown_tx`, which stops the supervisor.
struct ManagerControl {
    /// Set to `true` on intentional teardown.
    shutdown_tx: watch::Sender<bool>,
    /// Supervisor task, present once `connect` has been called.
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

// ============================================================================
// TransportManager
// ============================================================================

/// Owner of the single device connection.
///
/// Cloning yields another handle to the same connection. When the last
/// handle is dropped the socket is closed and no reconnect is attempted.
///
/// # Example
///
/// ```no_run
/// use ledbar_panel::transport::{Endpoint, TransportManager};
/// use ledbar_panel::ActionMessage;
///
/// # async fn example() -> ledbar_panel::Result<()> {
/// let transport = TransportManager::new(Endpoint::from_host("ledbar.local")?);
/// transport.connect()?;
///
/// // Dropped silently unless the socket is open
/// transport.send(ActionMessage::toggle(true));
///
/// transport.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TransportManager {
    inner: Arc<ManagerInner>,
    control: Arc<ManagerControl>,
}

impl TransportManager {
    /// Creates a manager with the default 2 s reconnect delay.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_reconnect_delay(endpoint, DEFAULT_RECONNECT_DELAY)
    }

    /// Creates a manager with a custom fixed reconnect delay.
    #[must_use]
    pub fn with_reconnect_delay(endpoint: Endpoint, reconnect_delay: Duration) -> Self {
        let (status_tx, _) = watch::channel(ConnectionStatus::Closed);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(ManagerInner {
                endpoint,
                reconnect_delay,
                status_tx,
                outgoing: Mutex::new(None),
                event_handler: Arc::new(Mutex::new(None)),
                attempts: AtomicU64::new(0),
            }),
            control: Arc::new(ManagerControl {
                shutdown_tx,
                supervisor: Mutex::new(None),
            }),
        }
    }

    /// Sets the event handler callback.
    ///
    /// Replaces any previously installed handler.
    pub fn set_event_handler(&self, handler: EventHandler) {
        *self.inner.event_handler.lock() = Some(handler);
    }

    /// Clears the event handler.
    pub fn clear_event_handler(&self) {
        *self.inner.event_handler.lock() = None;
    }

    /// Starts connecting, and reconnecting after every close.
    ///
    /// Calling this while the supervisor already runs does nothing.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] after [`shutdown`](Self::shutdown).
    pub fn connect(&self) -> Result<()> {
        if *self.control.shutdown_tx.borrow() {
            return Err(Error::connection("transport has been shut down"));
        }

        let mut supervisor = self.control.supervisor.lock();
        if supervisor.is_some() {
            debug!("Transport already started");
            return Ok(());
        }

        info!(endpoint = %self.inner.endpoint, "Starting transport");
        let shutdown = self.control.shutdown_tx.subscribe();
        *supervisor = Some(tokio::spawn(
            Arc::clone(&self.inner).run_supervisor(shutdown),
        ));
        Ok(())
    }

    /// Sends an action if the socket is open.
    ///
    /// Returns `true` if the action was handed to the open socket. When the
    /// connection is not open the action is dropped without error.
    pub fn send(&self, message: ActionMessage) -> bool {
        self.inner.send(message)
    }

    /// Returns a sink that sends through this connection without keeping
    /// it alive.
    ///
    /// Once every manager handle is dropped the sink drops all actions.
    #[must_use]
    pub fn sink(&self) -> TransportSink {
        TransportSink {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.inner.status()
    }

    /// Returns a snapshot of endpoint, status and attempt count.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState {
            endpoint: self.inner.endpoint.clone(),
            status: self.status(),
            attempts: self.connect_attempts(),
        }
    }

    /// Returns the device endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// Returns the fixed reconnect delay.
    #[inline]
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        self.inner.reconnect_delay
    }

    /// Returns how many connection attempts have started.
    #[inline]
    #[must_use]
    pub fn connect_attempts(&self) -> u64 {
        self.inner.attempts.load(Ordering::SeqCst)
    }

    /// Waits until the status equals `status`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the status channel is gone.
    pub async fn wait_for_status(&self, status: ConnectionStatus) -> Result<()> {
        let mut rx = self.inner.status_tx.subscribe();
        rx.wait_for(|current| *current == status)
            .await
            .map(|_| ())
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Stops the supervisor.
    ///
    /// Closes an open socket, cancels a pending reconnect and waits for the
    /// supervisor task to finish. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.control.shutdown_tx.send_replace(true);

        let supervisor = self.control.supervisor.lock().take();
        if let Some(handle) = supervisor {
            if let Err(e) = handle.await {
                warn!(error = %e, "Transport supervisor panicked");
            }
            info!(endpoint = %self.inner.endpoint, "Transport shut down");
        }
    }
}

impl ActionSink for TransportManager {
    fn send(&self, message: ActionMessage) -> bool {
        TransportManager::send(self, message)
    }
}

// ============================================================================
// TransportSink
// ============================================================================

/// Non-owning [`ActionSink`] over a [`TransportManager`].
///
/// Handed to the synchronizer so the event handler stored in the manager
/// does not keep the manager alive.
#[derive(Clone)]
pub struct TransportSink {
    inner: Weak<ManagerInner>,
}

impl ActionSink for TransportSink {
    fn send(&self, message: ActionMessage) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.send(message),
            None => {
                trace!(action = message.name(), "Transport dropped, dropping action");
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::time::timeout;

    use crate::transport::testing::FakeDevice;

    const SHORT_DELAY: Duration = Duration::from_millis(100);
    const LONG_DELAY: Duration = Duration::from_secs(30);
    const WAIT: Duration = Duration::from_secs(5);

    fn manager_for(device: &FakeDevice, delay: Duration) -> TransportManager {
        let endpoint = Endpoint::from_host(&device.host()).expect("valid endpoint");
        TransportManager::with_reconnect_delay(endpoint, delay)
    }

    async fn wait_status(manager: &TransportManager, status: ConnectionStatus) {
        timeout(WAIT, manager.wait_for_status(status))
            .await
            .expect("status wait timed out")
            .expect("status channel open");
    }

    fn recording_handler(manager: &TransportManager) -> mpsc::UnboundedReceiver<TransportEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        manager.set_event_handler(Box::new(move |event| {
            let _ = tx.send(event);
        }));
        rx
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_RECONNECT_DELAY.as_secs(), 2);
    }

    #[test]
    fn test_new_manager_is_closed() {
        let manager = TransportManager::new(Endpoint::from_host("ledbar.local").unwrap());
        assert_eq!(manager.status(), ConnectionStatus::Closed);
        assert_eq!(manager.connect_attempts(), 0);
        assert_eq!(manager.reconnect_delay(), DEFAULT_RECONNECT_DELAY);
        assert_eq!(manager.state().endpoint.as_str(), "ws://ledbar.local/ws");
    }

    #[test]
    fn test_send_before_connect_is_dropped() {
        let manager = TransportManager::new(Endpoint::from_host("ledbar.local").unwrap());
        assert!(!manager.send(ActionMessage::toggle(true)));
    }

    #[tokio::test]
    async fn test_send_when_open_transmits_one_frame() {
        let mut device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;

        assert!(manager.send(ActionMessage::brightness(42)));

        let frame = device.next_frame().await.expect("frame");
        assert_eq!(frame, json!({ "action": "brightness", "value": 42 }));
        device.assert_no_frame(Duration::from_millis(200)).await;

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_send_when_closed_transmits_nothing() {
        let mut device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;

        device.close_client();
        wait_status(&manager, ConnectionStatus::Closed).await;

        assert!(!manager.send(ActionMessage::toggle(false)));
        device.assert_no_frame(Duration::from_millis(200)).await;

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_snapshot_reaches_handler() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);
        let mut events = recording_handler(&manager);

        manager.connect().unwrap();
        assert_eq!(
            timeout(WAIT, events.recv()).await.unwrap(),
            Some(TransportEvent::Opened)
        );

        device.push("{\"action\": \"update\"");
        device.push(r#"{"action":"noise"}"#);
        device.push(
            json!({
                "action": "update",
                "deviceName": "Shelf",
                "ledState": true,
                "brightness": 55,
                "timerEnabled": false,
                "onHour": 20,
                "onMinute": 0,
                "offHour": 6,
                "offMinute": 0
            })
            .to_string(),
        );

        let event = timeout(WAIT, events.recv()).await.unwrap();
        let Some(TransportEvent::Snapshot(snapshot)) = event else {
            panic!("Expected snapshot, got {event:?}");
        };
        assert_eq!(snapshot.device_name.as_deref(), Some("Shelf"));
        assert_eq!(snapshot.brightness, 55);
        assert_eq!(manager.status(), ConnectionStatus::Open);

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_close_schedules_single_reconnect() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, SHORT_DELAY);
        let mut events = recording_handler(&manager);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;
        assert_eq!(manager.connect_attempts(), 1);

        device.close_client();
        wait_status(&manager, ConnectionStatus::Closed).await;
        assert_eq!(manager.connect_attempts(), 1);

        wait_status(&manager, ConnectionStatus::Open).await;
        assert_eq!(manager.connect_attempts(), 2);
        assert_eq!(device.accepted(), 2);

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = timeout(WAIT, events.recv()).await.expect("event");
            seen.extend(event);
        }
        assert_eq!(
            seen,
            vec![
                TransportEvent::Opened,
                TransportEvent::Closed,
                TransportEvent::Opened
            ]
        );

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_repeated_closes_never_duplicate_timers() {
        let device = FakeDevice::start_dropping(3).await;
        let manager = manager_for(&device, SHORT_DELAY);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;
        assert_eq!(manager.connect_attempts(), 4);
        assert_eq!(device.accepted(), 4);

        tokio::time::sleep(SHORT_DELAY * 4).await;
        assert_eq!(manager.connect_attempts(), 4);
        assert_eq!(device.accepted(), 4);

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_connect_is_retried() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Endpoint::from_host(&addr.to_string()).unwrap();
        let manager = TransportManager::with_reconnect_delay(endpoint, SHORT_DELAY);
        manager.connect().unwrap();

        timeout(WAIT, async {
            while manager.connect_attempts() < 3 {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("reconnect attempts should continue");
        assert_ne!(manager.status(), ConnectionStatus::Open);

        manager.shutdown().await;
        assert_eq!(manager.status(), ConnectionStatus::Closed);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_reconnect() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;

        device.close_client();
        wait_status(&manager, ConnectionStatus::Closed).await;

        timeout(Duration::from_secs(1), manager.shutdown())
            .await
            .expect("shutdown should not wait for the reconnect delay");
        assert_eq!(manager.connect_attempts(), 1);
        assert_eq!(device.accepted(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_closes_open_socket() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, SHORT_DELAY);

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;

        manager.shutdown().await;
        assert_eq!(manager.status(), ConnectionStatus::Closed);
        assert!(!manager.send(ActionMessage::toggle(true)));

        tokio::time::sleep(SHORT_DELAY * 3).await;
        assert_eq!(device.accepted(), 1);
        assert!(manager.connect().is_err());
    }

    #[tokio::test]
    async fn test_drop_without_shutdown_stops_reconnecting() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, Duration::from_millis(50));
        let sink = manager.sink();

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;
        assert!(sink.send(ActionMessage::toggle(true)));

        drop(manager);
        for _ in 0..4 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            device.close_client();
        }

        assert_eq!(device.accepted(), 1);
        assert!(!sink.send(ActionMessage::toggle(false)));
    }

    #[tokio::test]
    async fn test_sink_follows_connection() {
        let mut device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);
        let sink = manager.sink();

        assert!(!sink.send(ActionMessage::toggle(true)));

        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;
        assert!(sink.send(ActionMessage::brightness(7)));
        assert_eq!(
            device.next_frame().await,
            Some(json!({ "action": "brightness", "value": 7 }))
        );

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_connect_twice_starts_one_supervisor() {
        let device = FakeDevice::start().await;
        let manager = manager_for(&device, LONG_DELAY);

        manager.connect().unwrap();
        manager.connect().unwrap();
        wait_status(&manager, ConnectionStatus::Open).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(manager.connect_attempts(), 1);
        assert_eq!(device.accepted(), 1);

        manager.shutdown().await;
    }
}
