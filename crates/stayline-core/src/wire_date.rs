//! The [`WireDate`] timestamp codec.
//!
//! The chat backend emits timestamps in one of three ISO 8601-like
//! layouts: date only (`2017-11-19`), date with time and zone offset
//! (`2017-11-20T01:42:41Z`), and date with fractional seconds and zone
//! offset (`2017-11-21T17:50:48.813225Z`). A [`WireDate`] remembers which
//! layout it was parsed from, but always re-serializes using the
//! date-only layout — an asymmetry the backend contract depends on, so
//! re-encoding a time-bearing value truncates to day precision.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{CoreError, Result};

/// Pattern for the date-only layout.
const DATE_ONLY: &str = "%Y-%m-%d";

/// Which textual layout a [`WireDate`] was parsed from.
///
/// The three layouts are mutually exclusive on well-formed input, so
/// detection order carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateLayout {
    /// Date only. Example: `2017-11-19`.
    DateOnly,
    /// Date and time with zone offset. Example: `2017-11-20T01:42:41Z`.
    WithTime,
    /// Date and fractional time with zone offset.
    /// Example: `2017-11-21T17:50:48.813225Z`.
    WithFractionalTime,
}

/// An instant plus the wire layout it was parsed from.
///
/// Ordering and equality follow the instant (layout breaks ties), so
/// sorting a batch of events by `created` behaves as expected regardless
/// of which layout each timestamp arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireDate {
    /// The instant this timestamp represents, normalized to UTC.
    pub instant: DateTime<Utc>,
    /// The layout the text was parsed from (or should notionally carry).
    pub layout: DateLayout,
}

impl WireDate {
    /// Current instant with the given layout tag.
    pub fn now(layout: DateLayout) -> Self {
        Self {
            instant: Utc::now(),
            layout,
        }
    }

    /// Wrap an existing instant.
    pub fn from_instant(instant: DateTime<Utc>, layout: DateLayout) -> Self {
        Self { instant, layout }
    }

    /// Parse timestamp text, trying each known layout.
    ///
    /// Returns the instant together with a tag recording which layout
    /// matched, or [`CoreError::MalformedTimestamp`] if none did.
    pub fn parse(text: &str) -> Result<Self> {
        if let Ok(date) = NaiveDate::parse_from_str(text, DATE_ONLY) {
            return Ok(Self {
                instant: DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc),
                layout: DateLayout::DateOnly,
            });
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            // RFC 3339 covers both time-bearing layouts; the fraction
            // separator tells them apart.
            let layout = if text.contains('.') {
                DateLayout::WithFractionalTime
            } else {
                DateLayout::WithTime
            };
            return Ok(Self {
                instant: parsed.with_timezone(&Utc),
                layout,
            });
        }

        Err(CoreError::MalformedTimestamp {
            text: text.to_owned(),
        })
    }

    /// Render for the wire.
    ///
    /// Always uses the date-only layout, whatever `self.layout` says.
    /// Time-of-day precision is deliberately dropped on re-encode.
    pub fn format(&self) -> String {
        self.instant.format(DATE_ONLY).to_string()
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for WireDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for WireDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
