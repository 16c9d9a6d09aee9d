//! Normalizes provider-supplied timestamps into comparable instants.
//!
//! Backends disagree on format: RFC 3339 with an offset or `Z`, naive ISO,
//! or `YYYY-MM-DD HH:MM:SS` in local time. Anything else is unknown.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Go's zero `time.Time`, which the aggregator emits for "no date".
pub const ZERO_DATE: &str = "0001-01-01T00:00:00Z";

/// ISO forms with a numeric offset RFC 3339 rejects, e.g. `+0800`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
/// Offset-less forms, read as local time. `YYYY-MM-DD HH:MM:SS` is the
/// aggregator's own format.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%m-%d %H:%M";

/// `None` means unknown: absent, empty, the zero date, or unparseable.
pub fn parse(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?;
    if raw.is_empty() || raw == ZERO_DATE {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .and_then(|naive| in_local_time(&naive))
}

// Nonexistent local times (DST gaps) are treated as unknown.
fn in_local_time(naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Epoch seconds for ranking; unknown sorts as the oldest possible item.
pub fn sort_timestamp(instant: Option<&DateTime<FixedOffset>>) -> i64 {
    instant.map_or(0, |dt| dt.timestamp())
}

/// `MM-DD HH:MM` in the instant's own offset, or empty when unknown.
pub fn display(instant: Option<&DateTime<FixedOffset>>) -> String {
    instant
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
