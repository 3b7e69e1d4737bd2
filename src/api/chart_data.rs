use serde::{Deserialize, Serialize};

use crate::core::{AlignedPoint, CanonicalInstant, ChartPoint, ViewportTuning};
use crate::error::ReviewResult;

use super::label_text_formatter::format_time_tick;
use super::viewport_clamp_controller::ViewportClampController;

/// Parallel label/value arrays for one rendered series.
///
/// `None` values are breaks: a renderer must leave a gap, never draw zero or
/// connect the neighbouring points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl SeriesData {
    fn from_chart_points(points: &[ChartPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| p.time.to_iso_string()).collect(),
            values: points.iter().map(|p| p.value).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render payload for the raw and compressed series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub raw: SeriesData,
    pub compressed: SeriesData,
    /// Sorted, deduplicated instants of both series, break instants included.
    pub categories: Vec<CanonicalInstant>,
}

impl ChartData {
    #[must_use]
    pub fn build(raw: &[AlignedPoint], compressed: &[ChartPoint]) -> Self {
        let raw_points: Vec<ChartPoint> = raw.iter().copied().map(ChartPoint::from).collect();

        let mut categories: Vec<CanonicalInstant> = raw_points
            .iter()
            .chain(compressed)
            .map(|point| point.time)
            .collect();
        categories.sort_unstable();
        categories.dedup();

        Self {
            raw: SeriesData::from_chart_points(&raw_points),
            compressed: SeriesData::from_chart_points(compressed),
            categories,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every plotted value across both series, breaks excluded.
    pub fn plotted_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.raw
            .values
            .iter()
            .chain(&self.compressed.values)
            .filter_map(|value| *value)
    }

    #[must_use]
    pub fn category_labels(&self) -> Vec<String> {
        self.categories.iter().map(|t| t.to_iso_string()).collect()
    }

    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        self.categories.iter().copied().map(format_time_tick).collect()
    }

    /// Fits a clamp controller for this payload; `None` when nothing is plotted.
    pub fn viewport_controller(
        &self,
        tuning: ViewportTuning,
    ) -> ReviewResult<Option<ViewportClampController>> {
        if self.is_empty() || self.plotted_values().next().is_none() {
            return Ok(None);
        }
        ViewportClampController::fit(self.categories.clone(), self.plotted_values(), tuning)
            .map(Some)
    }
}
