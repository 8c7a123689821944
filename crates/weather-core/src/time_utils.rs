use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

/// Date-time layouts accepted for reading timestamps, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a naive timestamp as written by the sensor export.
///
/// Date-only strings resolve to midnight. No timezone handling is done:
/// the value is kept in whatever local time the export used.
///
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    if let Some(date) = parse_date(s) {
        return date.and_hms_opt(0, 0, 0);
    }

    warn!("could not parse timestamp string \"{}\"", s);
    None
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
