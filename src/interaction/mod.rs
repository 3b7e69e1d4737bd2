use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ReviewResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    Zooming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Pan,
    Zoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Categorical time axis addressed by label index.
    Time,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisEdge {
    Min,
    Max,
}

/// Visible window on both axes. Time is in category-index space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub time_min: f64,
    pub time_max: f64,
    pub value_min: f64,
    pub value_max: f64,
}

impl VisibleWindow {
    #[must_use]
    pub fn new(time: (f64, f64), value: (f64, f64)) -> Self {
        Self {
            time_min: time.0,
            time_max: time.1,
            value_min: value.0,
            value_max: value.1,
        }
    }

    #[must_use]
    pub fn time_range(self) -> (f64, f64) {
        (self.time_min, self.time_max)
    }

    #[must_use]
    pub fn value_range(self) -> (f64, f64) {
        (self.value_min, self.value_max)
    }

    #[must_use]
    pub fn edge(self, axis: Axis, edge: AxisEdge) -> f64 {
        match (axis, edge) {
            (Axis::Time, AxisEdge::Min) => self.time_min,
            (Axis::Time, AxisEdge::Max) => self.time_max,
            (Axis::Value, AxisEdge::Min) => self.value_min,
            (Axis::Value, AxisEdge::Max) => self.value_max,
        }
    }
}

/// Category-to-pixel mapping reported by the chart engine.
pub trait CategoryPixelMapping {
    fn pixel_for_category(&self, index: usize) -> f64;
    fn plot_left(&self) -> f64;
    fn plot_right(&self) -> f64;

    fn is_category_visible(&self, index: usize) -> bool {
        let px = self.pixel_for_category(index);
        px >= self.plot_left() && px <= self.plot_right()
    }
}

/// Evenly spaced categories across the plot area for a given time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCategoryMapping {
    plot_left: f64,
    plot_right: f64,
    window_min: f64,
    window_max: f64,
}

impl LinearCategoryMapping {
    pub fn new(plot_left: f64, plot_right: f64, window: (f64, f64)) -> ReviewResult<Self> {
        if !plot_left.is_finite() || !plot_right.is_finite() || plot_right < plot_left {
            return Err(ReviewError::InvalidData(
                "plot edges must be finite with right >= left".to_owned(),
            ));
        }
        if !window.0.is_finite() || !window.1.is_finite() || window.1 < window.0 {
            return Err(ReviewError::InvalidData(
                "category window must be finite with max >= min".to_owned(),
            ));
        }
        Ok(Self {
            plot_left,
            plot_right,
            window_min: window.0,
            window_max: window.1,
        })
    }
}

impl CategoryPixelMapping for LinearCategoryMapping {
    #[allow(clippy::cast_precision_loss)]
    fn pixel_for_category(&self, index: usize) -> f64 {
        let index = index as f64;
        let span = self.window_max - self.window_min;
        if span <= 0.0 {
            return if index == self.window_min {
                (self.plot_left + self.plot_right) / 2.0
            } else if index < self.window_min {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        let ratio = (index - self.window_min) / span;
        self.plot_left + ratio * (self.plot_right - self.plot_left)
    }

    fn plot_left(&self) -> f64 {
        self.plot_left
    }

    fn plot_right(&self) -> f64 {
        self.plot_right
    }
}

/// Tracks the gesture in progress between start and completion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionState {
    mode: InteractionMode,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    pub fn on_start(&mut self, kind: InteractionKind) {
        self.mode = match kind {
            InteractionKind::Pan => InteractionMode::Panning,
            InteractionKind::Zoom => InteractionMode::Zooming,
        };
    }

    pub fn on_complete(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
