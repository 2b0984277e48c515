//! The [`Composer`] enum — who authored a message or indicator.

use serde::{Deserialize, Serialize};

/// Which interlocutor composed a message or is typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Composer {
    /// Composed by the hotel.
    Hotel,
    /// Composed by the guest.
    Guest,
}
