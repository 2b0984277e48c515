//! Error types for event decoding and encoding.
//!
//! [`EventError`] is returned by the envelope codec. Decode failures are
//! per-frame: the socket layer reports them through its error callback
//! and moves on to the next frame, so nothing here is fatal.

use thiserror::Error;

/// Errors produced while decoding or encoding wire events.
#[derive(Debug, Error)]
pub enum EventError {
    /// The `type` discriminator is not one of the recognized tags.
    #[error("unknown event type: {tag}")]
    UnknownEventType {
        /// The unrecognized discriminator value.
        tag: String,
    },

    /// The frame is structurally invalid for its recognized type
    /// (missing or ill-typed envelope or payload fields, including
    /// malformed timestamps).
    #[error("malformed event: {source}")]
    MalformedEvent {
        /// The underlying field-level cause.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience type alias for event codec results.
pub type Result<T> = std::result::Result<T, EventError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_type_display() {
        let err = EventError::UnknownEventType {
            tag: "pokeMessage".into(),
        };
        assert_eq!(err.to_string(), "unknown event type: pokeMessage");
    }

    #[test]
    fn malformed_event_wraps_serde_cause() {
        let cause = serde_json::from_str::<String>("{").unwrap_err();
        let err = EventError::from(cause);
        assert!(err.to_string().starts_with("malformed event:"));
    }
}
