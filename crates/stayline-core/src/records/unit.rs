//! The [`Unit`] record.

use serde::{Deserialize, Serialize};

/// A property (hotel) in the backend's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Server-assigned unique identifier.
    pub unit_id: i64,
    /// Property code as assigned by the chain the unit belongs to.
    pub property_code: Option<String>,
    /// Human-readable name.
    pub name: String,
}
