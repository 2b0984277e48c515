//! The [`ChatMessage`] event variant.
//!
//! On the wire the envelope fields (`sessionId`, `created`, `type`) are
//! flat while the message body nests under a `chatMessage` key. The Rust
//! struct is flat; the nested layout lives in private wire helpers.
//!
//! Outbound frames carry only the client-originated fields — the
//! discriminator plus `localId`, `contentType`, `url` and `content`
//! under the nested key. Server-assigned fields (`id`, `read`, author
//! attribution, `media`) are never sent.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use stayline_core::local_id;
use stayline_core::wire_date::{DateLayout, WireDate};

use crate::composer::Composer;
use crate::errors::Result;
use crate::event_type::EventType;

/// Which media carried a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Media {
    /// Sent through the SMS subsystem.
    Sms,
    /// Sent through the Facebook Messenger subsystem.
    Facebook,
    /// Sent through the native web chat.
    Webchat,
}

/// The mime type of a chat message's contents.
///
/// Text types carry their payload inline in `content`; image types carry
/// a fully qualified `url` instead. Exactly one of the two is meaningful
/// per message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// Plain text with no styling; payload in `content`.
    #[serde(rename = "text/plain")]
    PlainText,
    /// Rich text in a whitelisted HTML subset; payload in `content`.
    #[serde(rename = "text/html")]
    RichText,
    /// PNG image; payload referenced by `url`.
    #[serde(rename = "image/png")]
    PngImage,
    /// GIF image; payload referenced by `url`.
    #[serde(rename = "image/gif")]
    GifImage,
    /// JPEG image; payload referenced by `url`.
    #[serde(rename = "image/jpeg")]
    JpegImage,
}

impl ContentType {
    /// Whether this content type carries its payload in `content`.
    pub fn is_text(self) -> bool {
        matches!(self, Self::PlainText | Self::RichText)
    }

    /// Whether this content type carries its payload by `url`.
    pub fn is_image(self) -> bool {
        !self.is_text()
    }
}

/// A chat message written by either interlocutor.
///
/// Two messages are the same logical message iff their `local_id`s match,
/// even when server-maintained fields differ between deliveries.
/// Ordering is by `created` descending (most recent first), which is
/// deliberately independent of equality.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    /// Chat session this message belongs to. Doubles as the client's
    /// credential on the socket — treat as a secret.
    pub session_id: String,
    /// When the message was created.
    pub created: WireDate,
    /// Server-assigned identifier; `0` until assigned. The same `id` may
    /// be delivered more than once when details were updated.
    pub id: i64,
    /// When the counterpart read the message; `None` if never read.
    pub read: Option<WireDate>,
    /// Client-generated idempotency token. See [`stayline_core::local_id`].
    pub local_id: Option<String>,
    /// Who composed the message.
    pub author: Composer,
    /// User-displayable author name.
    pub author_name: String,
    /// Avatar URL for the author, when available.
    pub author_avatar_url: Option<String>,
    /// Which media carried the message.
    pub media: Media,
    /// Payload URL for image content types.
    pub url: Option<String>,
    /// Inline payload for text content types.
    pub content: Option<String>,
    /// What kind of payload this message carries.
    pub content_type: ContentType,
}

impl ChatMessage {
    /// Build an outbound message with inline text content.
    ///
    /// Stamps `created` with the current instant, defaults the author to
    /// guest on web chat, and derives `local_id` when none is supplied.
    pub fn from_text(
        content: impl Into<String>,
        content_type: ContentType,
        session_id: impl Into<String>,
        local_id: Option<String>,
    ) -> Self {
        let content = content.into();
        let created = WireDate::now(DateLayout::DateOnly);
        let local_id = local_id.unwrap_or_else(|| local_id::derive(&content, created.instant));
        Self::outbound(session_id.into(), created, local_id, None, Some(content), content_type)
    }

    /// Build an outbound message referencing content by URL.
    ///
    /// Same defaulting rules as [`from_text`](Self::from_text).
    pub fn from_url(
        url: impl Into<String>,
        content_type: ContentType,
        session_id: impl Into<String>,
        local_id: Option<String>,
    ) -> Self {
        let url = url.into();
        let created = WireDate::now(DateLayout::DateOnly);
        let local_id = local_id.unwrap_or_else(|| local_id::derive(&url, created.instant));
        Self::outbound(session_id.into(), created, local_id, Some(url), None, content_type)
    }

    fn outbound(
        session_id: String,
        created: WireDate,
        local_id: String,
        url: Option<String>,
        content: Option<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            session_id,
            created,
            id: 0,
            read: None,
            local_id: Some(local_id),
            author: Composer::Guest,
            author_name: String::new(),
            author_avatar_url: None,
            media: Media::Webchat,
            url,
            content,
            content_type,
        }
    }

    pub(crate) fn decode(frame: &str) -> Result<Self> {
        let wire: InboundChatMessage = serde_json::from_str(frame)?;
        let body = wire.chat_message;
        Ok(Self {
            session_id: wire.session_id,
            created: wire.created,
            id: body.id,
            read: body.read,
            local_id: body.local_id,
            author: body.author,
            author_name: body.author_name,
            author_avatar_url: body.author_avatar_url,
            media: body.media,
            url: body.url,
            content: body.content,
            content_type: body.content_type,
        })
    }

    pub(crate) fn encode(&self) -> Result<String> {
        let wire = OutboundChatMessage {
            event_type: EventType::ChatMessage,
            chat_message: OutboundBody {
                local_id: self.local_id.as_deref(),
                content_type: self.content_type,
                url: self.url.as_deref(),
                content: self.content.as_deref(),
            },
        };
        Ok(serde_json::to_string(&wire)?)
    }
}

impl PartialEq for ChatMessage {
    fn eq(&self, other: &Self) -> bool {
        self.local_id == other.local_id
    }
}

impl Eq for ChatMessage {}

impl PartialOrd for ChatMessage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChatMessage {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most recent first.
        other.created.cmp(&self.created)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire layout
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboundChatMessage {
    session_id: String,
    created: WireDate,
    chat_message: InboundBody,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboundBody {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    read: Option<WireDate>,
    #[serde(default)]
    local_id: Option<String>,
    author: Composer,
    author_name: String,
    #[serde(default)]
    author_avatar_url: Option<String>,
    media: Media,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    content_type: ContentType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundChatMessage<'a> {
    #[serde(rename = "type")]
    event_type: EventType,
    chat_message: OutboundBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundBody<'a> {
    local_id: Option<&'a str>,
    content_type: ContentType,
    url: Option<&'a str>,
    content: Option<&'a str>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
