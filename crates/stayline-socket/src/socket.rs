//! The [`ChatSocket`] connection manager.
//!
//! Owns the WebSocket transport, a watchdog timer, and the reconnect
//! policy. The transport handle is exclusively owned and replaced, never
//! mutated in place: every reconnection bumps a generation counter, and
//! a superseded connection task stops touching shared state as soon as
//! it observes a newer generation.
//!
//! Recovery model:
//! - an unclean close reconnects immediately;
//! - the watchdog reconnects on its next tick whenever a URL is
//!   configured but the transport is observed dead, for the lifetime of
//!   the manager — it never stops itself on success;
//! - `close()` only closes; the watchdog will reopen unless the URL is
//!   also cleared via `clear_url()`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use stayline_events::{Event, decode_event, encode_event, split_frames};

use crate::config::SocketConfig;
use crate::dispatch::{Notice, run_dispatch};
use crate::errors::{Result, SocketError};
use crate::observer::SocketObserver;

/// Lifecycle phase of the managed transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No transport: no URL configured, explicitly closed, or dead and
    /// awaiting the next reconnect trigger.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The transport is open.
    Open,
    /// A close was requested and is being handshaken.
    Closing,
}

/// Manages a single socket connection to the chat backend.
///
/// Not safe for concurrent URL changes from multiple callers without
/// external serialization; observer callbacks are serialized internally.
pub struct ChatSocket {
    inner: Arc<Inner>,
    watchdog_task: JoinHandle<()>,
    _dispatch_task: JoinHandle<()>,
}

struct Inner {
    config: SocketConfig,
    notice_tx: mpsc::UnboundedSender<Notice>,
    /// Bumped under the state lock on every transport replacement.
    generation: AtomicU64,
    state: Mutex<ConnState>,
}

struct ConnState {
    url: Option<String>,
    phase: Phase,
    /// Set when the caller asked for the close in flight.
    closing: bool,
    outbound: Option<mpsc::Sender<Message>>,
    conn_task: Option<JoinHandle<()>>,
}

impl ChatSocket {
    /// Create a manager delivering to `observer`. No connection is
    /// attempted until [`set_url`](Self::set_url).
    pub fn new(config: SocketConfig, observer: Arc<dyn SocketObserver>) -> Self {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let interval = config.watchdog_interval();

        let inner = Arc::new(Inner {
            config,
            notice_tx,
            generation: AtomicU64::new(0),
            state: Mutex::new(ConnState {
                url: None,
                phase: Phase::Disconnected,
                closing: false,
                outbound: None,
                conn_task: None,
            }),
        });

        let dispatch_task = tokio::spawn(run_dispatch(observer, notice_rx));
        let watchdog_task = tokio::spawn(watchdog_loop(Arc::downgrade(&inner), interval));

        Self {
            inner,
            watchdog_task,
            _dispatch_task: dispatch_task,
        }
    }

    /// Set or change the target endpoint.
    ///
    /// Always forces a fresh connection attempt: any existing transport
    /// is discarded (a graceful close is attempted, lack of a clean
    /// handshake ignored) and a new one is opened against `url`.
    pub fn set_url(&self, url: impl Into<String>) {
        let mut state = self.inner.state.lock();
        state.url = Some(url.into());
        self.inner.reconnect_locked(&mut state);
    }

    /// Forget the endpoint and tear down any transport.
    ///
    /// This is the permanent stop: with no URL configured neither the
    /// watchdog nor a close notification will reconnect.
    pub fn clear_url(&self) {
        let mut state = self.inner.state.lock();
        state.url = None;
        self.inner.reconnect_locked(&mut state);
    }

    /// Encode `event` and write it to the open transport.
    ///
    /// Best-effort: fails with [`SocketError::NotConnected`] when no
    /// transport is open, and nothing is queued for later.
    pub fn send(&self, event: &Event) -> Result<()> {
        let json = encode_event(event).map_err(SocketError::Codec)?;
        let state = self.inner.state.lock();
        let outbound = state.outbound.as_ref().ok_or(SocketError::NotConnected)?;
        outbound.try_send(Message::text(json)).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                SocketError::Transport("outbound queue full".into())
            }
            mpsc::error::TrySendError::Closed(_) => SocketError::NotConnected,
        })
    }

    /// Ask the transport to close cleanly.
    ///
    /// Schedules no reconnection itself, but the watchdog will reopen
    /// the connection on its next tick unless the URL is also cleared.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        if let Some(outbound) = state.outbound.clone() {
            state.closing = true;
            state.phase = Phase::Closing;
            let _ = outbound.try_send(Message::Close(None));
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.inner.state.lock().phase
    }

    /// The currently configured endpoint, if any.
    pub fn url(&self) -> Option<String> {
        self.inner.state.lock().url.clone()
    }
}

impl Drop for ChatSocket {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        if let Some(task) = state.conn_task.take() {
            task.abort();
        }
        state.outbound = None;
        state.phase = Phase::Disconnected;
        drop(state);
        self.watchdog_task.abort();
        // Dispatch drains and exits once the notice channel closes.
    }
}

impl Inner {
    fn notify(&self, notice: Notice) {
        let _ = self.notice_tx.send(notice);
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the transport: abort whatever exists and, if a URL is
    /// configured, spawn a fresh connection under a new generation.
    /// Caller holds the state lock.
    fn reconnect_locked(self: &Arc<Self>, state: &mut ConnState) {
        if let Some(task) = state.conn_task.take() {
            task.abort();
        }
        state.outbound = None;
        state.closing = false;

        let Some(url) = state.url.clone() else {
            state.phase = Phase::Disconnected;
            return;
        };

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        state.phase = Phase::Connecting;
        debug!(%url, generation, "opening transport");
        state.conn_task = Some(tokio::spawn(run_connection(
            Arc::downgrade(self),
            url,
            generation,
        )));
    }

    /// Watchdog tick: reconnect if the transport is observed dead while
    /// a URL is configured.
    fn watchdog_check(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if state.url.is_some() && state.phase == Phase::Disconnected {
            warn!("watchdog found transport dead, reconnecting");
            self.reconnect_locked(&mut state);
        }
    }
}

/// Periodic liveness check. Holds only a weak handle so it winds down
/// with the manager.
async fn watchdog_loop(inner: std::sync::Weak<Inner>, interval: std::time::Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        let _ = ticker.tick().await;
        let Some(inner) = inner.upgrade() else { break };
        inner.watchdog_check();
    }
    debug!("manager gone, watchdog ending");
}

/// One transport's life, from connect to teardown.
async fn run_connection(inner: std::sync::Weak<Inner>, url: String, generation: u64) {
    let connected = connect_async(url.as_str()).await;

    let Some(strong) = inner.upgrade() else { return };
    let ws = match connected {
        Ok((ws, _response)) => ws,
        Err(e) => {
            warn!(error = %e, generation, "connect failed");
            let mut state = strong.state.lock();
            if strong.current_generation() == generation {
                state.phase = Phase::Disconnected;
                drop(state);
                strong.notify(Notice::Error(SocketError::Transport(e.to_string())));
            }
            return;
        }
    };

    let (out_tx, mut out_rx) = mpsc::channel(strong.config.send_queue_capacity);
    {
        let mut state = strong.state.lock();
        if strong.current_generation() != generation {
            // Superseded while connecting; the replacement owns state.
            return;
        }
        state.outbound = Some(out_tx);
        state.phase = Phase::Open;
    }
    debug!(generation, "transport open");
    strong.notify(Notice::Opened);
    drop(strong);

    let (mut sink, mut stream) = ws.split();
    let mut cleanly = false;

    loop {
        tokio::select! {
            outgoing = out_rx.recv() => match outgoing {
                Some(message) => {
                    if sink.send(message).await.is_err() {
                        break;
                    }
                }
                // Outbound handle replaced: this transport is done.
                None => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if !deliver_payload(&inner, generation, text.as_str()) {
                        return;
                    }
                }
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => {
                        if !deliver_payload(&inner, generation, text) {
                            return;
                        }
                    }
                    Err(_) => {
                        warn!("discarding non-UTF-8 transport payload");
                        if !deliver_error(&inner, generation, SocketError::BadTransportPayload) {
                            return;
                        }
                    }
                },
                Some(Ok(Message::Close(_))) => {
                    cleanly = true;
                    break;
                }
                // Pings are answered by the protocol layer.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, generation, "transport stream error");
                    if !deliver_error(&inner, generation, SocketError::Transport(e.to_string())) {
                        return;
                    }
                    break;
                }
                None => break,
            },
        }
    }

    finish_connection(&inner, generation, cleanly);
}

/// Split a transport payload into frames and deliver each decoded event
/// (or decode error) to the observer queue. Returns `false` when this
/// connection is superseded or the manager is gone.
fn deliver_payload(inner: &std::sync::Weak<Inner>, generation: u64, payload: &str) -> bool {
    let Some(strong) = inner.upgrade() else {
        return false;
    };
    if strong.current_generation() != generation {
        return false;
    }
    for frame in split_frames(payload) {
        match decode_event(frame) {
            Ok(event) => strong.notify(Notice::Event(event)),
            Err(e) => {
                warn!(error = %e, "failed to decode frame");
                strong.notify(Notice::Error(SocketError::Codec(e)));
            }
        }
    }
    true
}

/// Deliver a runtime error. Returns `false` when this connection is
/// superseded or the manager is gone.
fn deliver_error(inner: &std::sync::Weak<Inner>, generation: u64, error: SocketError) -> bool {
    let Some(strong) = inner.upgrade() else {
        return false;
    };
    if strong.current_generation() != generation {
        return false;
    }
    strong.notify(Notice::Error(error));
    true
}

/// Tear down after the stream ended: report the close and reconnect
/// immediately when it was unclean.
fn finish_connection(inner: &std::sync::Weak<Inner>, generation: u64, cleanly: bool) {
    let Some(strong) = inner.upgrade() else { return };

    let mut state = strong.state.lock();
    if strong.current_generation() != generation {
        // A replacement already owns the state and its own callbacks.
        return;
    }

    let cleanly = cleanly || state.closing;
    state.outbound = None;
    state.closing = false;
    state.phase = Phase::Disconnected;
    let reconnect = !cleanly && state.url.is_some();
    drop(state);

    debug!(generation, cleanly, reconnect, "transport closed");
    strong.notify(Notice::Closed { cleanly });

    if reconnect {
        let mut state = strong.state.lock();
        // Re-check: a caller may have raced in a clear_url.
        if strong.current_generation() == generation && state.url.is_some() {
            strong.reconnect_locked(&mut state);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use stayline_events::{ChatMessage, ContentType};

    use super::*;

    struct Silent;
    impl SocketObserver for Silent {}

    #[tokio::test]
    async fn send_without_url_is_not_connected() {
        let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Silent));
        let event = Event::ChatMessage(ChatMessage::from_text(
            "hi",
            ContentType::PlainText,
            "s",
            None,
        ));
        assert!(matches!(
            socket.send(&event),
            Err(SocketError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn starts_disconnected_with_no_url() {
        let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Silent));
        assert_eq!(socket.phase(), Phase::Disconnected);
        assert!(socket.url().is_none());
    }

    #[tokio::test]
    async fn close_without_transport_is_a_noop() {
        let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Silent));
        socket.close();
        assert_eq!(socket.phase(), Phase::Disconnected);
    }

    #[tokio::test]
    async fn set_url_enters_connecting() {
        let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Silent));
        socket.set_url("ws://127.0.0.1:1/ws");
        assert_eq!(socket.phase(), Phase::Connecting);
        assert_eq!(socket.url().as_deref(), Some("ws://127.0.0.1:1/ws"));
    }

    #[tokio::test]
    async fn clear_url_disconnects() {
        let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Silent));
        socket.set_url("ws://127.0.0.1:1/ws");
        socket.clear_url();
        assert_eq!(socket.phase(), Phase::Disconnected);
        assert!(socket.url().is_none());
    }
}
