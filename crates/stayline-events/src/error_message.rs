//! The [`ErrorMessage`] event variant.

use serde::{Deserialize, Serialize};

use stayline_core::wire_date::WireDate;

/// Server-side error report, usually about an event the client sent
/// earlier. Mostly useful for debugging; receiving one does not affect
/// the connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    /// Chat session this report belongs to.
    pub session_id: String,
    /// When the report was created.
    pub created: WireDate,
    /// Free-form diagnostic text from the server.
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_layout() {
        let report: ErrorMessage = serde_json::from_str(
            r#"{
                "sessionId": "s3cret",
                "created": "2017-11-19",
                "type": "errorMessage",
                "errorMessage": "unknown media"
            }"#,
        )
        .unwrap();
        assert_eq!(report.error_message, "unknown media");
    }
}
