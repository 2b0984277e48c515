//! The [`Guest`] record.

use serde::{Deserialize, Serialize};

/// A hotel guest as known to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Server-assigned unique identifier; `0` for client-created values
    /// that have not been registered yet.
    #[serde(default)]
    pub guest_id: i64,
    /// Full name of the guest.
    pub name: Option<String>,
    /// E-mail address of the guest.
    pub email: Option<String>,
    /// Mobile phone number in full international format.
    pub mobile: Option<String>,
}

impl Guest {
    /// Build a guest record that has not been assigned a server id yet.
    pub fn new(name: Option<String>, email: Option<String>, mobile: Option<String>) -> Self {
        Self {
            guest_id: 0,
            name,
            email,
            mobile,
        }
    }
}
