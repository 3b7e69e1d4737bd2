use serde::{Deserialize, Serialize};

use crate::core::primitives::CanonicalInstant;

/// Timestamp exactly as supplied by an upstream source.
///
/// Strings are the only representation that can normalize; any other JSON
/// value is kept so it can be reported and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Other(serde_json::Value),
}

impl RawTimestamp {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawTimestamp {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<CanonicalInstant> for RawTimestamp {
    fn from(value: CanonicalInstant) -> Self {
        Self::Text(value.to_iso_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: RawTimestamp,
    pub value: f64,
    /// Explicit segment boundary flag. Absent from older service responses.
    #[serde(default, rename = "segmentBreak", skip_serializing_if = "is_false")]
    pub segment_break: bool,
}

impl RawSample {
    #[must_use]
    pub fn new(timestamp: impl Into<RawTimestamp>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
            segment_break: false,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parallel timestamp/value arrays as delivered by an upload or cloud record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub raw_timestamps: Vec<RawTimestamp>,
    pub values: Vec<f64>,
}

impl RawDataset {
    #[must_use]
    pub fn new(raw_timestamps: Vec<RawTimestamp>, values: Vec<f64>) -> Self {
        Self {
            raw_timestamps,
            values,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() || self.raw_timestamps.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub time: CanonicalInstant,
    pub value: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub segment_break: bool,
}

impl AlignedPoint {
    #[must_use]
    pub fn new(time: CanonicalInstant, value: f64) -> Self {
        Self {
            time,
            value,
            segment_break: false,
        }
    }
}

/// Render-ready point. `value == None` marks a synthetic break.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: CanonicalInstant,
    pub value: Option<f64>,
}

impl ChartPoint {
    #[must_use]
    pub fn new(time: CanonicalInstant, value: f64) -> Self {
        Self {
            time,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn gap(time: CanonicalInstant) -> Self {
        Self { time, value: None }
    }

    #[must_use]
    pub fn is_gap(self) -> bool {
        self.value.is_none()
    }
}

impl From<AlignedPoint> for ChartPoint {
    fn from(point: AlignedPoint) -> Self {
        Self::new(point.time, point.value)
    }
}
