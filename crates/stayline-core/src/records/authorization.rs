//! The [`Authorization`] record decoded from the token endpoint.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// A bearer authorization issued by the token endpoint.
///
/// Wire field names are snake_case (`token_type`, `expires_in`,
/// `access_token`), unlike the rest of the protocol. The decode instant
/// is recorded so the expiration can be derived; it is never stored on
/// the wire.
#[derive(Clone, Debug, Deserialize)]
pub struct Authorization {
    /// When this value was decoded; anchor for [`expiration`](Self::expiration).
    #[serde(skip, default = "Utc::now")]
    created: DateTime<Utc>,
    /// The token type, usually `Bearer`.
    pub token_type: String,
    /// Seconds until the token expires, counted from `created`.
    pub expires_in: i64,
    /// The access token itself.
    pub access_token: String,
}

impl Authorization {
    /// The exact instant this authorization expires.
    pub fn expiration(&self) -> DateTime<Utc> {
        self.created + Duration::seconds(self.expires_in)
    }

    /// Whether the token has already expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiration()
    }

    /// The `Authorization` header value: `"<token_type> <access_token>"`.
    pub fn http_header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
