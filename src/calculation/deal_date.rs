//! Deal tracker `DATE` parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a deal tracker `DATE` cell.
///
/// Accepts RFC 3339 timestamps (the offset is dropped and the local wall-clock
/// time kept), ISO and US date-time layouts, and date-only values, which are
/// read as midnight. Returns `None` when nothing matches.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_deal_timestamp;
/// use chrono::NaiveDate;
///
/// let ts = parse_deal_timestamp("08/02/2025 9:15 AM").unwrap();
/// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
/// assert!(parse_deal_timestamp("yesterday").is_none());
/// ```
pub fn parse_deal_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
