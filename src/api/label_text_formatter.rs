use chrono::{DateTime, Timelike, Utc};

use crate::core::CanonicalInstant;

/// Compact tick text for a time label.
///
/// Midnight renders as `YYYY-MM-DD`, whole minutes as `MM-DD HH:MM`, anything
/// else as `MM-DD HH:MM:SS`. All fields are UTC.
#[must_use]
pub fn format_time_tick(instant: CanonicalInstant) -> String {
    format_datetime_tick(instant.as_datetime())
}

/// Same as [`format_time_tick`] for label text; unparseable text is returned as-is.
#[must_use]
pub fn format_time_tick_text(label: &str) -> String {
    match DateTime::parse_from_rfc3339(label) {
        Ok(time) => format_datetime_tick(time.with_timezone(&Utc)),
        Err(_) => label.to_owned(),
    }
}

fn format_datetime_tick(time: DateTime<Utc>) -> String {
    if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
        time.format("%Y-%m-%d").to_string()
    } else if time.second() == 0 {
        time.format("%m-%d %H:%M").to_string()
    } else {
        time.format("%m-%d %H:%M:%S").to_string()
    }
}
