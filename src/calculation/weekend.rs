//! Weekend policy resolution.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{WeekendPolicy, WeekendSetting};

/// Returns the latest date on or before `as_of` that falls on `weekday`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::most_recent_weekday;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2025-08-06 is a Wednesday; the previous Saturday is 2025-08-02
/// let as_of = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
/// assert_eq!(
///     most_recent_weekday(Weekday::Sat, as_of),
///     NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()
/// );
/// ```
pub fn most_recent_weekday(weekday: Weekday, as_of: NaiveDate) -> NaiveDate {
    let days_back = (as_of.weekday().num_days_from_monday() + 7
        - weekday.num_days_from_monday())
        % 7;
    as_of - Duration::days(i64::from(days_back))
}

/// Resolves the run's weekend setting into a concrete policy.
///
/// A [`WeekendSetting::FixedDate`] without a date defaults to the latest deal
/// date that falls on `weekday`, and to the latest calendar occurrence of
/// `weekday` on or before `as_of` when no deal falls on it.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_weekend_policy;
/// use payroll_engine::models::{WeekendPolicy, WeekendSetting};
/// use chrono::{NaiveDate, Weekday};
///
/// let deal_dates = [
///     NaiveDate::from_ymd_opt(2025, 7, 28).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(), // Saturday
/// ];
/// let as_of = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
///
/// let policy = resolve_weekend_policy(
///     WeekendSetting::FixedDate { date: None },
///     Weekday::Sat,
///     deal_dates,
///     as_of,
/// );
/// assert_eq!(
///     policy,
///     WeekendPolicy::FixedDate { date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap() }
/// );
/// ```
pub fn resolve_weekend_policy<I>(
    setting: WeekendSetting,
    weekday: Weekday,
    deal_dates: I,
    as_of: NaiveDate,
) -> WeekendPolicy
where
    I: IntoIterator<Item = NaiveDate>,
{
    match setting {
        WeekendSetting::Weekday => WeekendPolicy::Weekday { weekday },
        WeekendSetting::FixedDate { date: Some(date) } => WeekendPolicy::FixedDate { date },
        WeekendSetting::FixedDate { date: None } => {
            let date = deal_dates
                .into_iter()
                .filter(|date| date.weekday() == weekday)
                .max()
                .unwrap_or_else(|| most_recent_weekday(weekday, as_of));
            WeekendPolicy::FixedDate { date }
        }
    }
}
