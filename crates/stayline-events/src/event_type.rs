//! The [`EventType`] discriminator.
//!
//! Every frame carries a `type` field selecting which concrete schema
//! applies. The string values are part of the wire contract. The error
//! tag has been observed as both `errorMessage` and `error` across
//! backend versions, so both spellings decode; `errorMessage` is the
//! canonical spelling on encode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EventError;

/// Identifier of the type of event, which defines the rest of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Either guest or hotel has written a message.
    #[serde(rename = "chatMessage")]
    ChatMessage,
    /// Either guest or hotel is currently composing a message.
    #[serde(rename = "typingIndicator")]
    TypingIndicator,
    /// Error report for an event previously sent by the client.
    #[serde(rename = "errorMessage", alias = "error")]
    ErrorMessage,
}

impl EventType {
    /// The canonical wire tag.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::ChatMessage => "chatMessage",
            Self::TypingIndicator => "typingIndicator",
            Self::ErrorMessage => "errorMessage",
        }
    }

    /// Resolve a wire tag, accepting the legacy `error` spelling.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "chatMessage" => Some(Self::ChatMessage),
            "typingIndicator" => Some(Self::TypingIndicator),
            "errorMessage" | "error" => Some(Self::ErrorMessage),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EventType {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| EventError::UnknownEventType { tag: s.to_owned() })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
