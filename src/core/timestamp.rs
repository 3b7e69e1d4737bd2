use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::core::primitives::CanonicalInstant;
use crate::core::types::RawTimestamp;
use crate::error::{ReviewError, ReviewResult};

/// Anchor date for clock-only readings (`2025-02-18T00:00:00Z`).
pub const SYNTHETIC_BASE_EPOCH_MILLIS: i64 = 1_739_836_800_000;

static CLOCK_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s+(AM|PM)$").expect("static clock pattern")
});

const ISO_SHORT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%MZ"];

/// Normalizes one raw timestamp into a canonical instant.
///
/// `index` is the ordinal position of the sample inside its sequence. ISO-8601
/// values ignore it. Clock-only values (`H:MM AM|PM`) are anchored to the
/// synthetic base date and shifted by `index` seconds so equal readings stay
/// distinct and keep their input order.
pub fn normalize(raw: &RawTimestamp, index: usize) -> ReviewResult<CanonicalInstant> {
    let Some(text) = raw.as_text() else {
        return Err(invalid(raw_display(raw), "not a string"));
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(String::new(), "empty value"));
    }

    if text.contains('T') && text.ends_with('Z') {
        return parse_iso(text);
    }

    if let Some(captures) = CLOCK_12H.captures(text) {
        return parse_clock(text, &captures, index);
    }

    Err(invalid(text.to_owned(), "unrecognized format"))
}

fn parse_iso(text: &str) -> ReviewResult<CanonicalInstant> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(CanonicalInstant::from_datetime(time.with_timezone(&Utc)));
    }
    for format in ISO_SHORT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(CanonicalInstant::from_datetime(naive.and_utc()));
        }
    }
    Err(invalid(text.to_owned(), "invalid ISO 8601 instant"))
}

fn parse_clock(
    text: &str,
    captures: &regex::Captures<'_>,
    index: usize,
) -> ReviewResult<CanonicalInstant> {
    let hours: u32 = captures[1]
        .parse()
        .map_err(|_| invalid(text.to_owned(), "hour is not a number"))?;
    let minutes: u32 = captures[2]
        .parse()
        .map_err(|_| invalid(text.to_owned(), "minute is not a number"))?;

    let is_pm = captures[3].eq_ignore_ascii_case("PM");
    let hour = match (is_pm, hours) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };
    // The range applies to the converted 24-hour reading: `13:45 AM` is 13:45.
    if hour > 23 || minutes > 59 {
        return Err(invalid(text.to_owned(), "clock reading out of range"));
    }

    let offset_seconds = i64::try_from(index)
        .map_err(|_| invalid(text.to_owned(), "sequence index out of range"))?;
    let clock_millis = (i64::from(hour) * 3_600 + i64::from(minutes) * 60) * 1_000;
    let epoch_millis = offset_seconds
        .checked_mul(1_000)
        .and_then(|offset| offset.checked_add(SYNTHETIC_BASE_EPOCH_MILLIS + clock_millis))
        .ok_or_else(|| invalid(text.to_owned(), "sequence index out of range"))?;

    CanonicalInstant::from_epoch_millis(epoch_millis)
        .ok_or_else(|| invalid(text.to_owned(), "clock reading does not form a valid date"))
}

fn raw_display(raw: &RawTimestamp) -> String {
    match raw {
        RawTimestamp::Text(text) => text.clone(),
        RawTimestamp::Other(value) => value.to_string(),
    }
}

fn invalid(raw: String, reason: &'static str) -> ReviewError {
    ReviewError::InvalidTimestamp { raw, reason }
}
