use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::value_scale::saturating_span;
use crate::core::{AxisBounds, CanonicalInstant, ViewportBounds, ViewportTuning};
use crate::error::ReviewResult;
use crate::interaction::{
    Axis, AxisEdge, CategoryPixelMapping, InteractionKind, InteractionMode, InteractionState,
    LinearCategoryMapping, VisibleWindow,
};

use super::viewport_validation::{validate_plot_edges, validate_requested_window};

const AXIS_EDGES: [(Axis, AxisEdge); 4] = [
    (Axis::Time, AxisEdge::Min),
    (Axis::Time, AxisEdge::Max),
    (Axis::Value, AxisEdge::Min),
    (Axis::Value, AxisEdge::Max),
];

/// One chart option the host must overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisChange {
    pub axis: Axis,
    pub edge: AxisEdge,
    pub value: f64,
}

/// Every option change produced by one interaction, applied in a single redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportUpdate {
    pub changes: SmallVec<[AxisChange; 4]>,
    pub window: VisibleWindow,
    pub visible_labels: usize,
    pub recentered: bool,
}

impl ViewportUpdate {
    /// `true` when the host's chart already matches `window`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Keeps the chart's pan/zoom window inside the padded data bounds.
///
/// Bounds are fitted once per dataset and stay fixed while it is loaded. Only
/// the visible window moves, and only through interaction completions.
#[derive(Debug, Clone)]
pub struct ViewportClampController {
    bounds: ViewportBounds,
    tuning: ViewportTuning,
    window: VisibleWindow,
    interaction: InteractionState,
}

impl ViewportClampController {
    pub fn new(bounds: ViewportBounds, tuning: ViewportTuning) -> ReviewResult<Self> {
        let tuning = tuning.validate()?;
        let window = initial_window(&bounds);
        Ok(Self {
            bounds,
            tuning,
            window,
            interaction: InteractionState::default(),
        })
    }

    /// Fits bounds from the final render labels and non-null values.
    pub fn fit<I>(
        labels: Vec<CanonicalInstant>,
        values: I,
        tuning: ViewportTuning,
    ) -> ReviewResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let bounds = ViewportBounds::fit(labels, values, tuning)?;
        debug!(
            labels = bounds.time.len(),
            value_min = bounds.value.min,
            value_max = bounds.value.max,
            "fitted viewport bounds"
        );
        Self::new(bounds, tuning)
    }

    #[must_use]
    pub fn bounds(&self) -> &ViewportBounds {
        &self.bounds
    }

    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Labels currently at the time-window edges.
    #[must_use]
    pub fn window_labels(&self) -> (Option<CanonicalInstant>, Option<CanonicalInstant>) {
        (
            self.bounds.time.label_at(self.window.time_min),
            self.bounds.time.label_at(self.window.time_max),
        )
    }

    pub fn begin_interaction(&mut self, kind: InteractionKind) {
        self.interaction.on_start(kind);
    }

    /// Handles a zoom or pan completion.
    ///
    /// `requested` is the window the chart engine settled on; `mapping` is the
    /// engine's category-to-pixel mapping used for the visible-label count.
    pub fn on_interaction_complete<M>(
        &mut self,
        requested: VisibleWindow,
        mapping: &M,
    ) -> ReviewResult<ViewportUpdate>
    where
        M: CategoryPixelMapping + ?Sized,
    {
        validate_requested_window(requested)?;
        self.interaction.on_complete();

        let mut window = VisibleWindow::new(
            clamp_axis(requested.time_range(), self.bounds.time.bounds(), 0.0),
            clamp_axis(
                requested.value_range(),
                self.bounds.value,
                self.bounds.min_value_range,
            ),
        );

        let visible_labels = (0..self.bounds.time.len())
            .filter(|&index| mapping.is_category_visible(index))
            .count();
        let recentered = visible_labels <= self.tuning.min_visible_labels;
        if recentered {
            let (start, end) = self.bounds.time.center_window(self.tuning.min_visible_labels);
            warn!(
                visible_labels,
                start, end, "visible window too narrow, recentering on dataset midpoint"
            );
            window.time_min = start;
            window.time_max = end;
        }

        Ok(self.commit(requested, window, visible_labels, recentered))
    }

    /// Same as [`Self::on_interaction_complete`] with evenly spaced categories
    /// across `plot_left..=plot_right` for the clamped time window.
    pub fn on_interaction_complete_linear(
        &mut self,
        requested: VisibleWindow,
        plot_left: f64,
        plot_right: f64,
    ) -> ReviewResult<ViewportUpdate> {
        validate_requested_window(requested)?;
        validate_plot_edges(plot_left, plot_right)?;
        let clamped_time = clamp_axis(requested.time_range(), self.bounds.time.bounds(), 0.0);
        let mapping = LinearCategoryMapping::new(plot_left, plot_right, clamped_time)?;
        self.on_interaction_complete(requested, &mapping)
    }

    /// Restores the initial full-data window.
    pub fn reset(&mut self) -> ViewportUpdate {
        let current = self.window;
        let initial = initial_window(&self.bounds);
        self.commit(current, initial, self.bounds.time.len(), false)
    }

    fn commit(
        &mut self,
        requested: VisibleWindow,
        window: VisibleWindow,
        visible_labels: usize,
        recentered: bool,
    ) -> ViewportUpdate {
        let changes: SmallVec<[AxisChange; 4]> = AXIS_EDGES
            .iter()
            .filter(|(axis, edge)| requested.edge(*axis, *edge) != window.edge(*axis, *edge))
            .map(|&(axis, edge)| AxisChange {
                axis,
                edge,
                value: window.edge(axis, edge),
            })
            .collect();
        if !changes.is_empty() {
            debug!(changes = changes.len(), recentered, "viewport clamped");
        }
        self.window = window;
        ViewportUpdate {
            changes,
            window,
            visible_labels,
            recentered,
        }
    }
}

fn initial_window(bounds: &ViewportBounds) -> VisibleWindow {
    let time = bounds.time.bounds();
    VisibleWindow::new(
        (time.min, time.max),
        (bounds.value.padded_min, bounds.value.padded_max),
    )
}

/// Clamps `requested` into `[padded_min, padded_max]`.
///
/// A window that fits is shifted back inside with its span preserved; one that
/// does not is cut to the bounds. Spans below `min_span` widen around their
/// center first.
fn clamp_axis(requested: (f64, f64), bounds: AxisBounds, min_span: f64) -> (f64, f64) {
    let (mut lo, mut hi) = if requested.0 <= requested.1 {
        requested
    } else {
        (requested.1, requested.0)
    };
    let limit = bounds.padded_span();
    let span = saturating_span(lo, hi);
    let target_span = span.max(min_span).min(limit);

    if span < target_span {
        let center = lo + (hi / 2.0 - lo / 2.0);
        lo = center - target_span / 2.0;
        hi = center + target_span / 2.0;
    }
    if lo < bounds.padded_min {
        hi += bounds.padded_min - lo;
        lo = bounds.padded_min;
    }
    if hi > bounds.padded_max {
        lo -= hi - bounds.padded_max;
        hi = bounds.padded_max;
    }

    (
        lo.clamp(bounds.padded_min, bounds.padded_max),
        hi.clamp(bounds.padded_min, bounds.padded_max),
    )
}
