use serde::{Deserialize, Serialize};

use crate::core::category_scale::CategoryAxis;
use crate::core::primitives::CanonicalInstant;
use crate::core::value_scale::{AxisBounds, fit_value_bounds};
use crate::error::{ReviewError, ReviewResult};

/// Tuning controls for initial bounds and interactive clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    pub value_padding_ratio: f64,
    pub time_padding_categories: usize,
    /// Floor for the value-axis span when every value is (nearly) equal.
    pub min_value_span: f64,
    /// Smallest zoomed value range, as a share of the fitted span.
    pub min_value_range_ratio: f64,
    /// Recenter when this many labels or fewer remain visible.
    pub min_visible_labels: usize,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            value_padding_ratio: 0.05,
            time_padding_categories: 5,
            min_value_span: 1.0,
            min_value_range_ratio: 0.01,
            min_visible_labels: 3,
        }
    }
}

impl ViewportTuning {
    pub fn validate(self) -> ReviewResult<Self> {
        if !self.value_padding_ratio.is_finite() || self.value_padding_ratio < 0.0 {
            return Err(ReviewError::InvalidData(
                "value padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_value_span.is_finite() || self.min_value_span <= 0.0 {
            return Err(ReviewError::InvalidData(
                "value min span must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_value_range_ratio.is_finite()
            || self.min_value_range_ratio <= 0.0
            || self.min_value_range_ratio > 1.0
        {
            return Err(ReviewError::InvalidData(
                "min value range ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        if self.min_visible_labels == 0 {
            return Err(ReviewError::InvalidData(
                "min visible labels must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Axis bounds for one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub time: CategoryAxis,
    pub value: AxisBounds,
    /// Smallest value-axis window a zoom may produce.
    pub min_value_range: f64,
}

impl ViewportBounds {
    /// Fits bounds from the merged time labels and every non-null value.
    ///
    /// Labels must include synthetic break instants; values must exclude them.
    pub fn fit<I>(
        labels: Vec<CanonicalInstant>,
        values: I,
        tuning: ViewportTuning,
    ) -> ReviewResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let tuning = tuning.validate()?;
        let time = CategoryAxis::new(labels, tuning.time_padding_categories)?;
        let value = fit_value_bounds(values, tuning.value_padding_ratio, tuning.min_value_span)?;
        let effective_span = value.span().max(tuning.min_value_span);
        Ok(Self {
            time,
            value,
            min_value_range: effective_span * tuning.min_value_range_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewportBounds, ViewportTuning};
    use crate::core::CanonicalInstant;
    use approx::assert_relative_eq;

    #[test]
    fn default_tuning_is_valid() {
        assert!(ViewportTuning::default().validate().is_ok());
    }

    #[test]
    fn zero_visible_label_threshold_is_rejected() {
        let tuning = ViewportTuning {
            min_visible_labels: 0,
            ..ViewportTuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn min_value_range_tracks_effective_span() {
        let labels = vec![CanonicalInstant::from_epoch_millis(0).expect("instant")];
        let bounds =
            ViewportBounds::fit(labels, [0.0, 200.0], ViewportTuning::default()).expect("fit");
        assert_relative_eq!(bounds.min_value_range, 2.0);
    }
}
