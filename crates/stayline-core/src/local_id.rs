//! Client-side idempotency token derivation.
//!
//! Outbound chat messages carry a `localId` so the backend (and the
//! client's own receive path) can recognize re-delivery of the same
//! logical message independent of the server-assigned integer id. The
//! token mixes a random nonce into the digest, so two messages with
//! identical content and creation time still get distinct tokens —
//! uniqueness across retries is the contract, not determinism.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Derive an idempotency token from the message seed text (content or
/// URL) and its creation instant.
///
/// SHA-256 over `{seed}{unix seconds}{nonce}`, hex-encoded, then
/// base64-encoded.
pub fn derive(seed: &str, created: DateTime<Utc>) -> String {
    let nonce: u32 = rand::random();
    let material = format!("{seed}{}{nonce}", created.timestamp());

    let digest = Sha256::digest(material.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();

    base64::engine::general_purpose::STANDARD.encode(hex)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_base64_of_hex_digest() {
        let token = derive("hello", Utc::now());
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&token)
            .unwrap();
        // SHA-256 hex is 64 ASCII characters.
        assert_eq!(decoded.len(), 64);
        assert!(decoded.iter().all(u8::is_ascii_hexdigit));
    }

    #[test]
    fn identical_inputs_yield_distinct_tokens() {
        let created = Utc::now();
        let first = derive("same content", created);
        let second = derive("same content", created);
        assert_ne!(first, second, "nonce must keep retries distinguishable");
    }

    #[test]
    fn token_is_nonempty_for_empty_seed() {
        assert!(!derive("", Utc::now()).is_empty());
    }
}
