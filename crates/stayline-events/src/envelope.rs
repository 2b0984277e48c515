//! The [`Event`] envelope and the two-phase discriminated codec.
//!
//! Decoding is probe-then-full: phase one reads only the envelope fields
//! (`sessionId`, `created`, `type`) with the discriminator kept as a raw
//! string so an unrecognized tag maps to
//! [`EventError::UnknownEventType`] rather than a serde failure; phase
//! two decodes the same frame against the schema the tag selects.
//!
//! Encoding writes the discriminator first and then only the fields a
//! client legitimately originates for that variant.

use serde::{Deserialize, Serialize};
use tracing::trace;

use stayline_core::wire_date::WireDate;

use crate::chat_message::ChatMessage;
use crate::error_message::ErrorMessage;
use crate::errors::{EventError, Result};
use crate::event_type::EventType;
use crate::typing_indicator::TypingIndicator;

/// A fully decoded wire event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Either guest or hotel has written a message.
    ChatMessage(ChatMessage),
    /// Either guest or hotel is currently composing a message.
    TypingIndicator(TypingIndicator),
    /// Error report from the server.
    ErrorMessage(ErrorMessage),
}

impl Event {
    /// The discriminator for this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::ChatMessage(_) => EventType::ChatMessage,
            Self::TypingIndicator(_) => EventType::TypingIndicator,
            Self::ErrorMessage(_) => EventType::ErrorMessage,
        }
    }

    /// The session this event belongs to. Used for authenticating the
    /// client, so treat it as a secret.
    pub fn session_id(&self) -> &str {
        match self {
            Self::ChatMessage(m) => &m.session_id,
            Self::TypingIndicator(t) => &t.session_id,
            Self::ErrorMessage(e) => &e.session_id,
        }
    }

    /// When the event was created.
    pub fn created(&self) -> WireDate {
        match self {
            Self::ChatMessage(m) => m.created,
            Self::TypingIndicator(t) => t.created,
            Self::ErrorMessage(e) => e.created,
        }
    }
}

/// Phase one of the decode: envelope fields only.
///
/// The discriminator stays a raw string here so unknown tags are
/// distinguishable from structural damage.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeProbe {
    #[allow(dead_code)]
    session_id: String,
    #[allow(dead_code)]
    created: WireDate,
    #[serde(rename = "type")]
    event_type: String,
}

/// Decode one frame into a typed event.
///
/// Fails with [`EventError::UnknownEventType`] for an unrecognized
/// discriminator and [`EventError::MalformedEvent`] for structural
/// damage (missing or ill-typed fields, malformed timestamps).
pub fn decode_event(frame: &str) -> Result<Event> {
    let probe: EnvelopeProbe = serde_json::from_str(frame)?;
    let Some(event_type) = EventType::from_tag(&probe.event_type) else {
        return Err(EventError::UnknownEventType {
            tag: probe.event_type,
        });
    };
    trace!(%event_type, "decoding event frame");

    match event_type {
        EventType::ChatMessage => ChatMessage::decode(frame).map(Event::ChatMessage),
        EventType::TypingIndicator => {
            Ok(Event::TypingIndicator(serde_json::from_str(frame)?))
        }
        EventType::ErrorMessage => Ok(Event::ErrorMessage(serde_json::from_str(frame)?)),
    }
}

/// Flat variants get the discriminator spliced in on encode.
#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(flatten)]
    body: &'a T,
}

/// Encode one event as a single JSON frame.
pub fn encode_event(event: &Event) -> Result<String> {
    match event {
        Event::ChatMessage(message) => message.encode(),
        Event::TypingIndicator(indicator) => Ok(serde_json::to_string(&Tagged {
            event_type: EventType::TypingIndicator,
            body: indicator,
        })?),
        Event::ErrorMessage(report) => Ok(serde_json::to_string(&Tagged {
            event_type: EventType::ErrorMessage,
            body: report,
        })?),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::Value;

    use crate::chat_message::ContentType;
    use crate::composer::Composer;
    use crate::frames::split_frames;

    use super::*;

    const CHAT_FRAME: &str = r#"{"sessionId":"s","created":"2017-11-19","type":"chatMessage","chatMessage":{"id":1,"localId":"t","author":"guest","authorName":"Ada","media":"webchat","content":"hi","contentType":"text/plain"}}"#;
    const ERROR_FRAME: &str = r#"{"sessionId":"s","created":"2017-11-19","type":"errorMessage","errorMessage":"bad event"}"#;

    #[test]
    fn decodes_chat_message() {
        let event = decode_event(CHAT_FRAME).unwrap();
        assert_matches!(event, Event::ChatMessage(ref m) if m.content.as_deref() == Some("hi"));
        assert_eq!(event.event_type(), EventType::ChatMessage);
        assert_eq!(event.session_id(), "s");
    }

    #[test]
    fn decodes_typing_indicator_with_exact_timeout() {
        let frame = r#"{"sessionId":"s","created":"2017-11-19","type":"typingIndicator","timeout":30,"author":"hotel","authorName":"Front Desk"}"#;
        let event = decode_event(frame).unwrap();
        assert_matches!(event, Event::TypingIndicator(ref t) if t.timeout == 30);
    }

    #[test]
    fn decodes_error_message_with_legacy_tag() {
        let frame = r#"{"sessionId":"s","created":"2017-11-19","type":"error","errorMessage":"oops"}"#;
        let event = decode_event(frame).unwrap();
        assert_matches!(event, Event::ErrorMessage(ref e) if e.error_message == "oops");
    }

    #[test]
    fn unknown_tag_is_its_own_error() {
        let frame = r#"{"sessionId":"s","created":"2017-11-19","type":"pokeMessage"}"#;
        assert_matches!(
            decode_event(frame),
            Err(EventError::UnknownEventType { tag }) if tag == "pokeMessage"
        );
    }

    #[test]
    fn structural_damage_is_malformed_event() {
        // Recognized tag, but the nested body is missing.
        let frame = r#"{"sessionId":"s","created":"2017-11-19","type":"chatMessage"}"#;
        assert_matches!(decode_event(frame), Err(EventError::MalformedEvent { .. }));
    }

    #[test]
    fn malformed_timestamp_fails_the_frame() {
        let frame = r#"{"sessionId":"s","created":"not-a-date","type":"errorMessage","errorMessage":"x"}"#;
        let err = decode_event(frame).unwrap_err();
        assert_matches!(err, EventError::MalformedEvent { .. });
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn batched_frames_decode_independently() {
        let raw = format!("{CHAT_FRAME}\n{ERROR_FRAME}");
        let events: Vec<_> = split_frames(&raw).map(decode_event).collect();
        assert_eq!(events.len(), 2);
        assert_matches!(events[0], Ok(Event::ChatMessage(_)));
        assert_matches!(events[1], Ok(Event::ErrorMessage(_)));
    }

    #[test]
    fn bad_frame_does_not_poison_siblings() {
        let raw = format!("{{not json}}\n{ERROR_FRAME}");
        let results: Vec<_> = split_frames(&raw).map(decode_event).collect();
        assert!(results[0].is_err());
        assert_matches!(results[1], Ok(Event::ErrorMessage(_)));
    }

    #[test]
    fn encode_decode_preserves_local_id() {
        for (content_type, by_url) in [
            (ContentType::PlainText, false),
            (ContentType::RichText, false),
            (ContentType::PngImage, true),
            (ContentType::GifImage, true),
            (ContentType::JpegImage, true),
        ] {
            let original = if by_url {
                ChatMessage::from_url("https://cdn.example/x", content_type, "s", None)
            } else {
                ChatMessage::from_text("payload", content_type, "s", None)
            };
            let encoded = encode_event(&Event::ChatMessage(original.clone())).unwrap();

            // The outbound layout omits envelope fields the server fills
            // in; splice in what a server echo would carry before
            // decoding.
            let mut value: Value = serde_json::from_str(&encoded).unwrap();
            value["sessionId"] = Value::String("s".into());
            value["created"] = Value::String("2017-11-19".into());
            value["chatMessage"]["id"] = Value::from(7);
            value["chatMessage"]["author"] = Value::String("guest".into());
            value["chatMessage"]["authorName"] = Value::String("Ada".into());
            value["chatMessage"]["media"] = Value::String("webchat".into());

            let echoed = decode_event(&value.to_string()).unwrap();
            assert_matches!(
                echoed,
                Event::ChatMessage(ref m) if m.local_id == original.local_id,
                "localId must survive the round trip for {content_type:?}"
            );
        }
    }

    #[test]
    fn typing_indicator_encode_is_flat_and_tagged() {
        let indicator = TypingIndicator {
            session_id: "s".into(),
            created: WireDate::parse("2017-11-19").unwrap(),
            timeout: 30,
            author: Composer::Guest,
            author_name: "Ada".into(),
            author_avatar_url: None,
        };
        let value: Value = serde_json::from_str(
            &encode_event(&Event::TypingIndicator(indicator)).unwrap(),
        )
        .unwrap();
        assert_eq!(value["type"], "typingIndicator");
        assert_eq!(value["timeout"], 30);
        assert_eq!(value["sessionId"], "s");
    }
}
