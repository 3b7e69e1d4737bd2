use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Absolute UTC instant used for sorting, keying and comparison.
///
/// Precision is truncated to milliseconds so two instants compare equal exactly
/// when their ISO-8601 renderings do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalInstant(DateTime<Utc>);

impl CanonicalInstant {
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        let millis = time.timestamp_millis();
        // Truncation back to a whole millisecond is always representable.
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(time))
    }

    #[must_use]
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    #[must_use]
    pub fn epoch_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    #[must_use]
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Renders the instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[must_use]
    pub fn to_iso_string(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Arithmetic mean of both epoch values, rounded towards the earlier instant.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        let (lo, hi) = if self <= other {
            (self.epoch_millis(), other.epoch_millis())
        } else {
            (other.epoch_millis(), self.epoch_millis())
        };
        let mid = lo + (hi - lo) / 2;
        Self::from_epoch_millis(mid).unwrap_or(self)
    }
}

impl fmt::Display for CanonicalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for CanonicalInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for CanonicalInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InstantVisitor;

        impl Visitor<'_> for InstantVisitor {
            type Value = CanonicalInstant;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 UTC timestamp")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                DateTime::parse_from_rfc3339(value)
                    .map(|time| CanonicalInstant::from_datetime(time.with_timezone(&Utc)))
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_str(InstantVisitor)
    }
}
