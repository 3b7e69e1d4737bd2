use serde::{Deserialize, Serialize};

use crate::core::primitives::CanonicalInstant;
use crate::core::value_scale::AxisBounds;
use crate::error::{ReviewError, ReviewResult};

/// Ordered time labels addressed by category index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    labels: Vec<CanonicalInstant>,
    bounds: AxisBounds,
}

impl CategoryAxis {
    /// Builds the axis over sorted, deduplicated labels.
    ///
    /// Padding is `padding_categories` positions on each side, clamped to the
    /// label index range: the axis never extends past its first or last label.
    pub fn new(
        mut labels: Vec<CanonicalInstant>,
        padding_categories: usize,
    ) -> ReviewResult<Self> {
        labels.sort_unstable();
        labels.dedup();
        let Some(last_index) = labels.len().checked_sub(1) else {
            return Err(ReviewError::InvalidData(
                "time axis cannot be built from empty labels".to_owned(),
            ));
        };

        let padded_start = 0usize.saturating_sub(padding_categories);
        let padded_end = last_index.saturating_add(padding_categories).min(last_index);

        Ok(Self {
            bounds: AxisBounds {
                min: 0.0,
                max: index_to_f64(last_index),
                padded_min: index_to_f64(padded_start),
                padded_max: index_to_f64(padded_end),
            },
            labels,
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[CanonicalInstant] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Label at the category position nearest to `position`.
    #[must_use]
    pub fn label_at(&self, position: f64) -> Option<CanonicalInstant> {
        if !position.is_finite() || position < -0.5 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = position.round().max(0.0) as usize;
        self.labels.get(index).copied()
    }

    /// Category index of an exact label.
    #[must_use]
    pub fn index_of(&self, label: CanonicalInstant) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// `width`-label window centred on the full sequence's midpoint index.
    #[must_use]
    pub fn center_window(&self, width: usize) -> (f64, f64) {
        let last_index = self.labels.len().saturating_sub(1);
        let center = self.labels.len() / 2;
        let half = width.saturating_sub(1) / 2;
        let start = center.saturating_sub(half);
        let end = center.saturating_add(half).min(last_index);
        (index_to_f64(start), index_to_f64(end))
    }
}

#[allow(clippy::cast_precision_loss)]
fn index_to_f64(index: usize) -> f64 {
    index as f64
}
