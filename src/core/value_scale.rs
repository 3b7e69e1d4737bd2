use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ReviewResult};

/// Strict data limits of one axis plus the padded outer limits for zoom/pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub padded_min: f64,
    pub padded_max: f64,
}

impl AxisBounds {
    #[must_use]
    pub fn span(self) -> f64 {
        saturating_span(self.min, self.max)
    }

    #[must_use]
    pub fn padded_span(self) -> f64 {
        saturating_span(self.padded_min, self.padded_max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.padded_min && value <= self.padded_max
    }
}

/// Fits value-axis bounds from every non-null sample.
///
/// `padding_ratio` extends both sides by a share of the data span. When the
/// span is narrower than `min_span`, the axis is first widened symmetrically
/// around its center to `min_span` so the padded axis never collapses.
pub fn fit_value_bounds<I>(values: I, padding_ratio: f64, min_span: f64) -> ReviewResult<AxisBounds>
where
    I: IntoIterator<Item = f64>,
{
    if !padding_ratio.is_finite() || padding_ratio < 0.0 {
        return Err(ReviewError::InvalidData(
            "value padding ratio must be finite and >= 0".to_owned(),
        ));
    }
    if !min_span.is_finite() || min_span <= 0.0 {
        return Err(ReviewError::InvalidData(
            "value min span must be finite and > 0".to_owned(),
        ));
    }

    let mut lowest: Option<OrderedFloat<f64>> = None;
    let mut highest: Option<OrderedFloat<f64>> = None;
    for value in values {
        if !value.is_finite() {
            return Err(ReviewError::InvalidData(
                "chart values must be finite".to_owned(),
            ));
        }
        let value = OrderedFloat(value);
        lowest = Some(lowest.map_or(value, |current| current.min(value)));
        highest = Some(highest.map_or(value, |current| current.max(value)));
    }

    let (Some(OrderedFloat(min)), Some(OrderedFloat(max))) = (lowest, highest) else {
        return Err(ReviewError::InvalidData(
            "value bounds cannot be built from empty data".to_owned(),
        ));
    };

    let (axis_min, axis_max) = if saturating_span(min, max) < min_span {
        let center = min + (max / 2.0 - min / 2.0);
        (center - min_span / 2.0, center + min_span / 2.0)
    } else {
        (min, max)
    };
    let pad = saturating_span(axis_min, axis_max) * padding_ratio;
    let (padded_min, padded_max) = (axis_min - pad, axis_max + pad);
    if !padded_min.is_finite() || !padded_max.is_finite() {
        return Err(ReviewError::InvalidData(format!(
            "padded value bounds overflow for data range [{min}, {max}]"
        )));
    }

    Ok(AxisBounds {
        min,
        max,
        padded_min,
        padded_max,
    })
}

/// `hi - lo` computed on halves so finite inputs never overflow to infinity;
/// spans wider than `f64::MAX` saturate.
pub(crate) fn saturating_span(lo: f64, hi: f64) -> f64 {
    ((hi / 2.0 - lo / 2.0) * 2.0).min(f64::MAX)
}
