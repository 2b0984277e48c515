//! Socket configuration.
//!
//! A small serde-deserializable struct so hosts can ship overrides in
//! their own config files; every field has a compiled default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default watchdog interval in milliseconds (reference behavior: 6 s).
pub const DEFAULT_WATCHDOG_INTERVAL_MS: u64 = 6_000;
/// Default capacity of the outbound write queue.
pub const DEFAULT_SEND_QUEUE_CAPACITY: usize = 64;

/// Configuration for a [`ChatSocket`](crate::ChatSocket).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketConfig {
    /// How often the watchdog checks for a silently dead transport, in
    /// ms (default: 6000).
    #[serde(default = "default_watchdog_interval_ms")]
    pub watchdog_interval_ms: u64,
    /// Outbound write queue capacity (default: 64). `send` fails rather
    /// than blocks when the queue is full.
    #[serde(default = "default_send_queue_capacity")]
    pub send_queue_capacity: usize,
}

fn default_watchdog_interval_ms() -> u64 {
    DEFAULT_WATCHDOG_INTERVAL_MS
}
fn default_send_queue_capacity() -> usize {
    DEFAULT_SEND_QUEUE_CAPACITY
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            watchdog_interval_ms: DEFAULT_WATCHDOG_INTERVAL_MS,
            send_queue_capacity: DEFAULT_SEND_QUEUE_CAPACITY,
        }
    }
}

impl SocketConfig {
    /// The watchdog interval as a [`Duration`].
    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_millis(self.watchdog_interval_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
