//! # stayline-socket
//!
//! Connection manager for the Stayline guest-messaging SDK.
//!
//! [`ChatSocket`] keeps one WebSocket connection to the chat backend
//! alive: it owns the transport handle, runs a watchdog that revives
//! silently dead connections, reconnects immediately on unclean closes,
//! and funnels every notification — opens, closes, decoded events,
//! runtime errors — through one serial dispatch task to a
//! [`SocketObserver`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use stayline_socket::{ChatSocket, SocketConfig, SocketObserver};
//!
//! struct Printer;
//! impl SocketObserver for Printer {
//!     fn received_chat_message(&self, message: stayline_events::ChatMessage) {
//!         println!("{:?}", message.content);
//!     }
//! }
//!
//! let socket = ChatSocket::new(SocketConfig::default(), Arc::new(Printer));
//! socket.set_url("wss://chat.example/ws");
//! ```

#![deny(unsafe_code)]

pub mod config;
mod dispatch;
pub mod errors;
pub mod observer;
pub mod socket;

pub use config::SocketConfig;
pub use errors::{Result, SocketError};
pub use observer::SocketObserver;
pub use socket::{ChatSocket, Phase};
