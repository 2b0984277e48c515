//! Inert value records consumed or produced around the event core.
//!
//! These are plain attribute bags decoded from the backend's REST
//! surface: no invariants beyond field presence, no behavior beyond a
//! couple of derived values on [`Authorization`].

pub mod authorization;
pub mod guest;
pub mod stay;
pub mod unit;

pub use authorization::Authorization;
pub use guest::Guest;
pub use stay::{ChatSession, GuestStay, StayStatus};
pub use unit::Unit;
