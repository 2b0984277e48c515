//! # stayline-events
//!
//! Wire events for the Stayline guest-messaging SDK.
//!
//! Frames are line-delimited UTF-8 JSON objects, each carrying a flat
//! envelope (`sessionId`, `created`, `type`) and a variant-specific
//! payload. This crate provides:
//!
//! - **`EventType`**: the discriminator, including the legacy `error`
//!   tag spelling
//! - **`Event`**: the decoded union of `ChatMessage`, `TypingIndicator`
//!   and `ErrorMessage`
//! - **`decode_event` / `encode_event`**: probe-then-full two-phase
//!   decode and client-fields-only encode
//! - **`split_frames`**: newline splitting for batched transport
//!   payloads

#![deny(unsafe_code)]

pub mod chat_message;
pub mod composer;
pub mod envelope;
pub mod error_message;
pub mod errors;
pub mod event_type;
pub mod frames;
pub mod typing_indicator;

pub use chat_message::{ChatMessage, ContentType, Media};
pub use composer::Composer;
pub use envelope::{Event, decode_event, encode_event};
pub use error_message::ErrorMessage;
pub use errors::{EventError, Result};
pub use event_type::EventType;
pub use frames::split_frames;
pub use typing_indicator::TypingIndicator;
