use tracing::{debug, warn};

use crate::core::timestamp::normalize;
use crate::core::types::{AlignedPoint, RawSample, RawTimestamp};
use crate::error::{ReviewError, ReviewResult};

/// Zips values with normalized timestamps into a chronologically sorted series.
///
/// Points whose timestamp does not normalize, or whose value is not finite, are
/// dropped. Ties keep their input order.
pub fn align(values: &[f64], raw_timestamps: &[RawTimestamp]) -> ReviewResult<Vec<AlignedPoint>> {
    if values.len() != raw_timestamps.len() {
        return Err(ReviewError::DataMismatch {
            values: values.len(),
            timestamps: raw_timestamps.len(),
        });
    }

    let points = values
        .iter()
        .zip(raw_timestamps)
        .enumerate()
        .filter_map(|(index, (&value, raw))| aligned_point(index, raw, value, false))
        .collect();
    Ok(finish(points, values.len()))
}

/// Same as [`align`] for already paired samples; explicit segment breaks carry over.
#[must_use]
pub fn align_samples(samples: &[RawSample]) -> Vec<AlignedPoint> {
    let points = samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            aligned_point(index, &sample.timestamp, sample.value, sample.segment_break)
        })
        .collect();
    finish(points, samples.len())
}

fn aligned_point(
    index: usize,
    raw: &RawTimestamp,
    value: f64,
    segment_break: bool,
) -> Option<AlignedPoint> {
    if !value.is_finite() {
        warn!(index, value, "dropping sample with non-finite value");
        return None;
    }
    match normalize(raw, index) {
        Ok(time) => Some(AlignedPoint {
            time,
            value,
            segment_break,
        }),
        Err(err) => {
            warn!(index, error = %err, "dropping sample with invalid timestamp");
            None
        }
    }
}

fn finish(mut points: Vec<AlignedPoint>, input_len: usize) -> Vec<AlignedPoint> {
    // `sort_by_key` is stable: equal instants keep input order.
    points.sort_by_key(|point| point.time);
    debug!(
        input_len,
        aligned_len = points.len(),
        dropped = input_len - points.len(),
        "aligned series"
    );
    points
}

#[cfg(test)]
mod tests {
    use super::{align, align_samples};
    use crate::core::{RawSample, RawTimestamp};
    use crate::error::ReviewError;

    fn stamps(values: &[&str]) -> Vec<RawTimestamp> {
        values.iter().map(|v| RawTimestamp::from(*v)).collect()
    }

    #[test]
    fn length_mismatch_is_reported_not_truncated() {
        let err = align(&[1.0, 2.0], &stamps(&["2025-02-18T00:00:00Z"])).expect_err("mismatch");
        assert!(matches!(
            err,
            ReviewError::DataMismatch {
                values: 2,
                timestamps: 1
            }
        ));
    }

    #[test]
    fn invalid_timestamps_drop_value_and_timestamp() {
        let points = align(
            &[1.0, 2.0, 3.0],
            &stamps(&["2025-02-18T00:00:02Z", "garbage", "2025-02-18T00:00:01Z"]),
        )
        .expect("align");
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 1.0]);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let points = align(
            &[f64::NAN, 4.0],
            &stamps(&["2025-02-18T00:00:00Z", "2025-02-18T00:00:01Z"]),
        )
        .expect("align");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 4.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let points = align(
            &[7.0, 8.0, 9.0],
            &stamps(&[
                "2025-02-18T00:00:05Z",
                "2025-02-18T00:00:05Z",
                "2025-02-18T00:00:01Z",
            ]),
        )
        .expect("align");
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![9.0, 7.0, 8.0]);
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(align(&[], &[]).expect("align").is_empty());
        assert!(align_samples(&[]).is_empty());
    }

    #[test]
    fn samples_carry_explicit_segment_breaks() {
        let mut flagged = RawSample::new("2025-02-18T00:00:01Z", 2.0);
        flagged.segment_break = true;
        let points = align_samples(&[RawSample::new("2025-02-18T00:00:00Z", 1.0), flagged]);
        assert!(!points[0].segment_break);
        assert!(points[1].segment_break);
    }
}
