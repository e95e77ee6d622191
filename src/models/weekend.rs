//! Weekend policy models.
//!
//! Which deals earn the weekend premium is an explicit per-run policy. The
//! caller supplies a [`WeekendSetting`]; the pipeline resolves it into a
//! concrete [`WeekendPolicy`] that is applied to both the weekend deal count
//! and the weekend pay rate, and recorded on the report.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The weekend policy requested for a run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WeekendSetting;
///
/// let setting: WeekendSetting =
///     serde_json::from_str(r#"{"policy": "fixed_date", "date": "2025-08-02"}"#).unwrap();
/// assert!(matches!(setting, WeekendSetting::FixedDate { date: Some(_) }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WeekendSetting {
    /// A single reference date. When `date` is omitted it defaults to the
    /// latest date in the deal data falling on the configured weekday, then
    /// to the latest calendar occurrence of that weekday.
    FixedDate {
        /// The explicit reference date, if any.
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    /// Every date falling on the configured weekday.
    Weekday,
}

/// A resolved weekend policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WeekendPolicy {
    /// Only deals dated exactly `date` are weekend deals.
    FixedDate {
        /// The reference date.
        date: NaiveDate,
    },
    /// Deals dated on any `weekday` are weekend deals.
    Weekday {
        /// The premium weekday.
        weekday: Weekday,
    },
}

impl WeekendPolicy {
    /// Returns true if a deal on `date` earns the weekend premium.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::WeekendPolicy;
    /// use chrono::{NaiveDate, Weekday};
    ///
    /// let policy = WeekendPolicy::Weekday { weekday: Weekday::Sat };
    /// // 2025-08-02 and 2025-08-09 are Saturdays
    /// assert!(policy.is_weekend(NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()));
    /// assert!(policy.is_weekend(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()));
    /// assert!(!policy.is_weekend(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()));
    /// ```
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        match self {
            WeekendPolicy::FixedDate { date: reference } => date == *reference,
            WeekendPolicy::Weekday { weekday } => date.weekday() == *weekday,
        }
    }
}

impl std::fmt::Display for WeekendPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekendPolicy::FixedDate { date } => write!(f, "fixed date {}", date),
            WeekendPolicy::Weekday { weekday } => write!(f, "every {}", weekday),
        }
    }
}
