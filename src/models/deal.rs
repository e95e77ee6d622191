//! Deal tracker models.
//!
//! A deal moves through three shapes: the [`RawDealRow`] read from the
//! export, the [`DealRecord`] with normalized names and a parsed timestamp,
//! and the [`ResolvedDeal`] whose names have been reconciled against the
//! timesheet rosters.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One data row of the deal tracker exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDealRow {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    /// The `CLOSER` cell.
    pub closer: String,
    /// The `ENROLLER` cell.
    pub enroller: String,
    /// The `DATE` cell.
    pub date: String,
}

/// A deal with normalized names and a parsed timestamp.
///
/// `timestamp` is `None` when the `DATE` cell could not be parsed. Such a
/// deal still counts toward raw deal totals but never toward weekend or
/// first-deal-of-day aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    /// 1-based data row number, used as the stable tie-break order.
    pub row: usize,
    /// Normalized closer name (empty when absent).
    pub closer: String,
    /// Normalized enroller name (empty when absent).
    pub enroller: String,
    /// The parsed `DATE` value.
    pub timestamp: Option<NaiveDateTime>,
}

impl DealRecord {
    /// Returns the calendar-day bucket of the deal, if its date parsed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// A deal whose closer and enroller have been resolved to agent identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeal {
    /// 1-based data row number.
    pub row: usize,
    /// Resolved closer identity (empty when the deal has no closer).
    pub closer: String,
    /// Resolved enroller identity (empty when the deal has no enroller).
    pub enroller: String,
    /// The parsed `DATE` value.
    pub timestamp: Option<NaiveDateTime>,
}

impl ResolvedDeal {
    /// Returns the calendar-day bucket of the deal, if its date parsed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// Per-closer deal statistics for one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloserDealStats {
    /// Deals where this agent is the resolved closer.
    pub deal_count: u32,
    /// The subset of `deal_count` that fell on the weekend reference day.
    pub weekend_deals: u32,
    /// Distinct days on which this agent closed the earliest deal company-wide.
    pub first_deal_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_record_date_bucket() {
        let deal = DealRecord {
            row: 1,
            closer: "John Smith".to_string(),
            enroller: String::new(),
            timestamp: NaiveDateTime::parse_from_str("2025-08-02 23:59:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
        };
        assert_eq!(deal.date(), NaiveDate::from_ymd_opt(2025, 8, 2));
    }

    #[test]
    fn test_deal_record_without_timestamp_has_no_bucket() {
        let deal = DealRecord {
            row: 3,
            closer: "John Smith".to_string(),
            enroller: String::new(),
            timestamp: None,
        };
        assert_eq!(deal.date(), None);
    }
}
