//! Error types for the connection manager.
//!
//! Nothing here is fatal: codec and transport-payload failures are
//! reported through the observer's error callback and the connection
//! carries on; connection-level failures are handled by reconnection.

use thiserror::Error;

use stayline_events::EventError;

/// Errors produced by a [`ChatSocket`](crate::ChatSocket).
#[derive(Debug, Error)]
pub enum SocketError {
    /// `send` was attempted with no open transport. Sends are
    /// best-effort; nothing is queued while disconnected.
    #[error("no open transport")]
    NotConnected,

    /// The transport delivered a payload that is not UTF-8 text.
    #[error("transport payload is not UTF-8 text")]
    BadTransportPayload,

    /// A frame failed to decode, or an outbound event failed to encode.
    #[error("event codec error: {0}")]
    Codec(#[from] EventError),

    /// Transport-level failure (connect error, broken stream, full
    /// write queue).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Convenience type alias for socket results.
pub type Result<T> = std::result::Result<T, SocketError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn not_connected_display() {
        assert_eq!(SocketError::NotConnected.to_string(), "no open transport");
    }

    #[test]
    fn codec_error_wraps_event_error() {
        let cause = EventError::UnknownEventType {
            tag: "pokeMessage".into(),
        };
        let err = SocketError::from(cause);
        assert_matches!(err, SocketError::Codec(_));
        assert!(err.to_string().contains("pokeMessage"));
    }
}
