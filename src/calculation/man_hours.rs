//! Timesheet duration conversion.
//!
//! Timesheets record time worked as `H:M:S`. Payroll pays whole hours, and a
//! partial hour always counts as a full hour.

use rust_decimal::Decimal;

const SECONDS_PER_HOUR: u64 = 3600;

/// Parses an `H:M:S` duration and rounds it up to whole hours.
///
/// Each field must be a non-negative integer; surrounding whitespace is
/// ignored. Minutes and seconds are not limited to 59 (`"1:90:00"` is two and
/// a half hours, so three). Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_duration_hours;
///
/// assert_eq!(parse_duration_hours("1:30:00"), Some(2));
/// assert_eq!(parse_duration_hours("0:00:01"), Some(1));
/// assert_eq!(parse_duration_hours("2:00:00"), Some(2));
/// assert_eq!(parse_duration_hours("2 hours"), None);
/// ```
pub fn parse_duration_hours(raw: &str) -> Option<u64> {
    let mut fields = raw.trim().split(':');
    let hours = parse_field(fields.next())?;
    let minutes = parse_field(fields.next())?;
    let seconds = parse_field(fields.next())?;
    if fields.next().is_some() {
        return None;
    }

    let total_seconds = hours
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;

    Some(total_seconds.div_ceil(SECONDS_PER_HOUR))
}

fn parse_field(field: Option<&str>) -> Option<u64> {
    let field = field?.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Converts a timesheet duration to payable hours.
///
/// Malformed durations are worth zero hours; callers that need to report the
/// data-quality problem check [`parse_duration_hours`] instead.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::man_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(man_hours("45:00:00"), Decimal::from(45));
/// assert_eq!(man_hours("not a duration"), Decimal::ZERO);
/// ```
pub fn man_hours(raw: &str) -> Decimal {
    parse_duration_hours(raw)
        .map(Decimal::from)
        .unwrap_or(Decimal::ZERO)
}
