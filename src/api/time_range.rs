use crate::core::{RawDataset, RawTimestamp};
use crate::error::{ReviewError, ReviewResult};

/// Slices `full` to the inclusive range between two of its own labels.
///
/// Labels are matched on their raw text, first occurrence wins.
pub fn select_time_range(full: &RawDataset, start: &str, end: &str) -> ReviewResult<RawDataset> {
    if start.is_empty() || end.is_empty() {
        return Err(ReviewError::InvalidData(
            "please select both start and end times".to_owned(),
        ));
    }
    if full.values.len() != full.raw_timestamps.len() {
        return Err(ReviewError::DataMismatch {
            values: full.values.len(),
            timestamps: full.raw_timestamps.len(),
        });
    }

    let position = |label: &str| {
        full.raw_timestamps
            .iter()
            .position(|raw| raw.as_text() == Some(label))
    };
    let (Some(start_index), Some(end_index)) = (position(start), position(end)) else {
        return Err(ReviewError::InvalidData(
            "selected times not found in dataset".to_owned(),
        ));
    };
    if start_index > end_index {
        return Err(ReviewError::InvalidData(
            "start time must be before end time".to_owned(),
        ));
    }

    Ok(RawDataset::new(
        full.raw_timestamps[start_index..=end_index].to_vec(),
        full.values[start_index..=end_index].to_vec(),
    ))
}

/// First and last raw labels, the default selection after a load.
#[must_use]
pub fn full_range_labels(full: &RawDataset) -> Option<(&str, &str)> {
    let first = full.raw_timestamps.first().and_then(RawTimestamp::as_text)?;
    let last = full.raw_timestamps.last().and_then(RawTimestamp::as_text)?;
    Some((first, last))
}
