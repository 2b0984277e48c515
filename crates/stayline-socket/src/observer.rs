//! The [`SocketObserver`] callback seam.

use stayline_events::{ChatMessage, ErrorMessage, TypingIndicator};

use crate::errors::SocketError;

/// Receives everything a [`ChatSocket`](crate::ChatSocket) produces.
///
/// Every method is invoked from one dedicated dispatch task, never
/// concurrently with another, regardless of which transport task
/// produced the underlying notification — observer implementations need
/// no locking of their own. All methods default to no-ops so observers
/// implement only what they need.
pub trait SocketObserver: Send + Sync + 'static {
    /// The socket connected successfully. Also called after an
    /// automatic reconnection succeeds.
    fn socket_did_open(&self) {}

    /// The socket closed. When `cleanly` is `false` the close was caused
    /// by an error or timeout and the socket is already attempting to
    /// reopen; a successful reopen produces another
    /// [`socket_did_open`](Self::socket_did_open).
    fn socket_did_close(&self, cleanly: bool) {
        let _ = cleanly;
    }

    /// A chat message arrived.
    fn received_chat_message(&self, message: ChatMessage) {
        let _ = message;
    }

    /// A typing indicator arrived.
    fn received_typing_indicator(&self, indicator: TypingIndicator) {
        let _ = indicator;
    }

    /// A server-side error report arrived.
    fn received_error_message(&self, report: ErrorMessage) {
        let _ = report;
    }

    /// A runtime error happened (frame decode failure, bad transport
    /// payload, connect failure). The connection is unaffected unless a
    /// close notification follows separately.
    fn produced_error(&self, error: SocketError) {
        let _ = error;
    }
}
