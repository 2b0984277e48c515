//! Serialized observer dispatch.
//!
//! The transport may produce notifications from any task; all of them
//! are funneled through one unbounded queue consumed by a single task,
//! which is the only place observer methods are ever invoked. That task
//! is the "designated serial callback context" of the protocol: the
//! observer sees notifications one at a time, in the order they were
//! enqueued.
//!
//! Staleness is handled at the source: a superseded connection task
//! stops enqueuing as soon as it observes a newer generation, and
//! anything it enqueued before that dispatches harmlessly in order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use stayline_events::Event;

use crate::errors::SocketError;
use crate::observer::SocketObserver;

/// A notification on its way to the observer.
#[derive(Debug)]
pub(crate) enum Notice {
    /// Transport opened.
    Opened,
    /// Transport closed; `cleanly = false` means a reconnect is already
    /// in flight.
    Closed {
        /// Whether the close was a proper handshake rather than an
        /// error or timeout.
        cleanly: bool,
    },
    /// A decoded inbound event.
    Event(Event),
    /// A runtime error.
    Error(SocketError),
}

/// Consume the notice queue and invoke the observer, one notice at a
/// time. Runs until every sender is gone.
pub(crate) async fn run_dispatch(
    observer: Arc<dyn SocketObserver>,
    mut notices: mpsc::UnboundedReceiver<Notice>,
) {
    while let Some(notice) = notices.recv().await {
        match notice {
            Notice::Opened => observer.socket_did_open(),
            Notice::Closed { cleanly } => observer.socket_did_close(cleanly),
            Notice::Event(Event::ChatMessage(message)) => observer.received_chat_message(message),
            Notice::Event(Event::TypingIndicator(indicator)) => {
                observer.received_typing_indicator(indicator);
            }
            Notice::Event(Event::ErrorMessage(report)) => observer.received_error_message(report),
            Notice::Error(error) => observer.produced_error(error),
        }
    }
    debug!("notice queue closed, dispatch ending");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl SocketObserver for Recorder {
        fn socket_did_open(&self) {
            self.calls.lock().push("open".into());
        }
        fn socket_did_close(&self, cleanly: bool) {
            self.calls.lock().push(format!("close:{cleanly}"));
        }
        fn produced_error(&self, error: SocketError) {
            self.calls.lock().push(format!("error:{error}"));
        }
    }

    #[tokio::test]
    async fn notices_dispatch_in_enqueue_order() {
        let observer = Arc::new(Recorder::default());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(Notice::Opened).unwrap();
        tx.send(Notice::Error(SocketError::NotConnected)).unwrap();
        tx.send(Notice::Closed { cleanly: false }).unwrap();
        drop(tx);

        run_dispatch(observer.clone(), rx).await;

        let calls = observer.calls.lock();
        assert_eq!(
            *calls,
            vec![
                "open".to_string(),
                "error:no open transport".to_string(),
                "close:false".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn dispatch_ends_when_senders_drop() {
        let observer = Arc::new(Recorder::default());
        let (tx, rx) = mpsc::unbounded_channel::<Notice>();
        drop(tx);
        // Must return rather than hang.
        run_dispatch(observer, rx).await;
    }
}
