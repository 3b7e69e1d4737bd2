use std::collections::HashSet;

use tracing::{debug, trace};

use crate::core::types::{AlignedPoint, ChartPoint};

/// Builds the render sequence for a compressed series.
///
/// The compression service reuses an instant as a boundary between unrelated
/// segments. Whenever a point repeats an instant already emitted, a null-valued
/// break is inserted at the midpoint between it and its predecessor so a line
/// renderer does not bridge the two segments. A point carrying an explicit
/// `segment_break` flag gets the same treatment.
///
/// For non-empty input the output length is in
/// `points.len()..=2 * points.len() - 1`.
#[must_use]
pub fn reconcile(points: &[AlignedPoint]) -> Vec<ChartPoint> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(points.len() + points.len() / 4);
    let mut seen: HashSet<i64> = HashSet::with_capacity(points.len());

    out.push(ChartPoint::from(*first));
    seen.insert(first.time.epoch_millis());

    let mut prev = first;
    for current in rest {
        let key = current.time.epoch_millis();
        if seen.contains(&key) || current.segment_break {
            let gap_time = prev.time.midpoint(current.time);
            trace!(at = %gap_time, "inserting segment break");
            out.push(ChartPoint::gap(gap_time));
        }
        out.push(ChartPoint::from(*current));
        seen.insert(key);
        prev = current;
    }

    debug!(
        input_len = points.len(),
        breaks = out.len() - points.len(),
        "reconciled compressed series"
    );
    out
}

/// Splits a render sequence into the contiguous runs a line renderer may connect.
#[must_use]
pub fn connected_runs(points: &[ChartPoint]) -> Vec<&[ChartPoint]> {
    points
        .split(|point| point.is_gap())
        .filter(|run| !run.is_empty())
        .collect()
}
