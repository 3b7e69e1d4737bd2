use crate::error::{ReviewError, ReviewResult};
use crate::interaction::VisibleWindow;

pub(super) fn validate_requested_window(window: VisibleWindow) -> ReviewResult<()> {
    if !window.time_min.is_finite() || !window.time_max.is_finite() {
        return Err(ReviewError::InvalidData(
            "requested time window must be finite".to_owned(),
        ));
    }
    if !window.value_min.is_finite() || !window.value_max.is_finite() {
        return Err(ReviewError::InvalidData(
            "requested value window must be finite".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_plot_edges(plot_left: f64, plot_right: f64) -> ReviewResult<()> {
    if !plot_left.is_finite() || !plot_right.is_finite() {
        return Err(ReviewError::InvalidData(
            "plot edges must be finite".to_owned(),
        ));
    }
    if plot_right <= plot_left {
        return Err(ReviewError::InvalidData(
            "plot right edge must be > left edge".to_owned(),
        ));
    }
    Ok(())
}
