use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ReviewResult};

/// Bytes stored per sample when estimating storage size.
pub const BYTES_PER_SAMPLE: u64 = 4;

/// Summary of one compression run, rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionMetrics {
    pub raw_points: usize,
    pub compressed_points: usize,
    /// `None` when nothing survived compression (infinite ratio).
    pub compression_ratio: Option<Decimal>,
    pub raw_storage_kb: Decimal,
    pub compressed_storage_kb: Decimal,
    /// `None` when either series is empty.
    pub error_rate_percent: Option<Decimal>,
}

impl CompressionMetrics {
    /// Computes metrics from raw values and plotted compressed values (breaks excluded).
    pub fn compute(raw: &[f64], compressed: &[f64]) -> ReviewResult<Self> {
        let compression_ratio = if compressed.is_empty() {
            None
        } else {
            Some(round2(
                Decimal::from(raw.len()) / Decimal::from(compressed.len()),
            ))
        };

        let error_rate_percent = if raw.is_empty() || compressed.is_empty() {
            None
        } else {
            let raw_sum: f64 = raw.iter().sum();
            let compressed_sum: f64 = compressed.iter().sum();
            if raw_sum == 0.0 {
                Some(round2(Decimal::ZERO))
            } else {
                // Near-zero raw sums can push the rate outside `Decimal` range.
                let rate = (1.0 - compressed_sum / raw_sum) * 100.0;
                Decimal::from_f64(rate).map(round2)
            }
        };

        Ok(Self {
            raw_points: raw.len(),
            compressed_points: compressed.len(),
            compression_ratio,
            raw_storage_kb: storage_kb(raw.len()),
            compressed_storage_kb: storage_kb(compressed.len()),
            error_rate_percent,
        })
    }

    /// Display rows in table order.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Number of Data Points (Raw)", self.raw_points.to_string()),
            (
                "Number of Data Points (Compressed)",
                self.compressed_points.to_string(),
            ),
            (
                "Compression Ratio",
                self.compression_ratio
                    .map_or_else(|| "Infinity".to_owned(), |r| r.to_string()),
            ),
            ("Storage Size (Raw) (KB)", self.raw_storage_kb.to_string()),
            (
                "Storage Size (Compressed) (KB)",
                self.compressed_storage_kb.to_string(),
            ),
            (
                "Error Rate (%)",
                self.error_rate_percent
                    .map_or_else(|| "N/A".to_owned(), |r| r.to_string()),
            ),
        ]
    }

    pub fn to_json_pretty(&self) -> ReviewResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ReviewError::InvalidData(format!("failed to serialize metrics json: {e}"))
        })
    }
}

fn storage_kb(points: usize) -> Decimal {
    let bytes = Decimal::from(points as u64 * BYTES_PER_SAMPLE);
    round2(bytes / Decimal::from(1024u32))
}

fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
