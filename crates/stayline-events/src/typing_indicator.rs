//! The [`TypingIndicator`] event variant.

use serde::{Deserialize, Serialize};

use stayline_core::wire_date::WireDate;

use crate::composer::Composer;

/// Notification that the counterpart is composing a message.
///
/// Consumer contract: each new indicator for the same session **resets**
/// any visibility countdown derived from `timeout` — it does not extend
/// it. The SDK carries the value; it runs no timers itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicator {
    /// Chat session this indicator belongs to.
    pub session_id: String,
    /// When the indicator was created.
    pub created: WireDate,
    /// Maximum number of seconds the indicator should stay visible.
    pub timeout: u32,
    /// Who is currently typing.
    pub author: Composer,
    /// User-displayable name of the typing author.
    pub author_name: String,
    /// Avatar URL for the typing author, when available.
    #[serde(default)]
    pub author_avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_layout() {
        let indicator: TypingIndicator = serde_json::from_str(
            r#"{
                "sessionId": "s3cret",
                "created": "2017-11-20T01:42:41Z",
                "type": "typingIndicator",
                "timeout": 30,
                "author": "hotel",
                "authorName": "Front Desk"
            }"#,
        )
        .unwrap();
        assert_eq!(indicator.timeout, 30);
        assert_eq!(indicator.author, Composer::Hotel);
        assert!(indicator.author_avatar_url.is_none());
    }
}
