//! # stayline-core
//!
//! Foundation types for the Stayline guest-messaging SDK.
//!
//! This crate provides the shared vocabulary the event and socket crates
//! depend on:
//!
//! - **`WireDate`**: the three-layout timestamp codec every event and
//!   several records rely on
//! - **`local_id`**: derivation of the client-side idempotency token
//! - **Records**: inert value records (guest, stay, unit, chat session,
//!   authorization) decoded from the backend's REST surface
//! - **Errors**: `CoreError` via `thiserror`

#![deny(unsafe_code)]

pub mod errors;
pub mod local_id;
pub mod records;
pub mod wire_date;

pub use errors::{CoreError, Result};
pub use records::{Authorization, ChatSession, Guest, GuestStay, StayStatus, Unit};
pub use wire_date::{DateLayout, WireDate};
