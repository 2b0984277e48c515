//! Newline frame splitting.
//!
//! The transport may batch several JSON objects into one message,
//! separated by `\n`. Splitting is purely structural: empty segments are
//! dropped, relative order is preserved, and no JSON parsing happens
//! here.

/// Split a raw transport payload into individual frame texts.
pub fn split_frames(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n')
        .map(|segment| segment.strip_suffix('\r').unwrap_or(segment))
        .filter(|segment| !segment.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
