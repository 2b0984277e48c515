//! The [`GuestStay`] record and its companions.

use serde::{Deserialize, Serialize};

use crate::records::guest::Guest;
use crate::wire_date::WireDate;

/// Where a guest currently is in their journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    /// Guest has not arrived yet.
    Prestay,
    /// Guest is currently at the hotel.
    Instay,
    /// Guest has checked out.
    Poststay,
    /// Guest is currently booking a new stay.
    Nextstay,
}

/// The chat session attached to a stay.
///
/// `session_id` doubles as the client's authentication token on the
/// socket, so treat it as a secret. `wss_url` stays constant for the
/// duration of the stay and may be cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Unique identifier of the chat session.
    pub session_id: String,
    /// Fully qualified secure WebSocket URL to connect to.
    pub wss_url: String,
}

/// One guest stay at one unit.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestStay {
    /// Server-assigned unique identifier of this stay.
    pub stay_id: i64,
    /// The unit this stay belongs to.
    pub unit_id: i64,
    /// Journey status.
    pub status: StayStatus,
    /// Booking reference as provided by the property-management system.
    #[serde(default)]
    pub booking_reference: Option<String>,
    /// When the stay was booked.
    #[serde(default)]
    pub booking_date: Option<WireDate>,
    /// Arrival date.
    #[serde(default)]
    pub checkin_date: Option<WireDate>,
    /// Departure date.
    #[serde(default)]
    pub checkout_date: Option<WireDate>,
    /// The guest's room number.
    #[serde(default)]
    pub room: Option<String>,
    /// ISO 639-1 language the guest prefers, chosen per stay.
    pub language: String,
    /// The guest on this stay; `None` for anonymous stays.
    #[serde(default)]
    pub guest: Option<Guest>,
    /// Chat session associated with this stay.
    pub chat_session: ChatSession,
}

#[cfg(test)]
mod tests {
    use crate::wire_date::DateLayout;

    use super::*;

    #[test]
    fn decodes_full_stay() {
        let stay: GuestStay = serde_json::from_str(
            r#"{
                "stayId": 901,
                "unitId": 7,
                "status": "instay",
                "bookingReference": "ABC123",
                "bookingDate": "2017-10-01",
                "checkinDate": "2017-11-19",
                "checkoutDate": "2017-11-23",
                "room": "214",
                "language": "sv",
                "guest": {"guestId": 42, "name": "Ada", "email": null, "mobile": null},
                "chatSession": {"sessionId": "s3cret", "wssUrl": "wss://chat.example/ws"}
            }"#,
        )
        .unwrap();

        assert_eq!(stay.stay_id, 901);
        assert_eq!(stay.status, StayStatus::Instay);
        assert_eq!(stay.checkin_date.unwrap().layout, DateLayout::DateOnly);
        assert_eq!(stay.chat_session.wss_url, "wss://chat.example/ws");
    }

    #[test]
    fn decodes_anonymous_stay() {
        let stay: GuestStay = serde_json::from_str(
            r#"{
                "stayId": 902,
                "unitId": 7,
                "status": "prestay",
                "language": "en",
                "chatSession": {"sessionId": "s", "wssUrl": "wss://chat.example/ws"}
            }"#,
        )
        .unwrap();
        assert!(stay.guest.is_none());
        assert!(stay.booking_date.is_none());
    }

    #[test]
    fn status_wire_strings_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&StayStatus::Poststay).unwrap(),
            "\"poststay\""
        );
    }
}
