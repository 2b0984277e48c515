//! Error types for the foundation crate.
//!
//! [`CoreError`] covers the failure modes of the timestamp codec. The
//! event and socket crates define their own error enums and wrap these
//! where they surface through decoding.

use thiserror::Error;

/// Errors produced by `stayline-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The text matched none of the three known timestamp layouts.
    #[error("not a recognized timestamp: {text}")]
    MalformedTimestamp {
        /// The offending input text.
        text: String,
    },
}

/// Convenience type alias for core results.
pub type Result<T> = std::result::Result<T, CoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
