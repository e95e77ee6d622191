//! Per-agent deal statistics.
//!
//! Aggregation works on [`ResolvedDeal`]s, so every count is keyed by agent
//! identity rather than by spelling. Deals with an empty closer (or enroller)
//! are not credited to anyone.
//!
//! Deals whose date did not parse count toward the raw deal count but never
//! toward the weekend count or the first-deal-of-day count.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{CloserDealStats, ResolvedDeal, WeekendPolicy};

/// Computes deal count, weekend deals and first-deal-of-day days per closer.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate_closer_deals;
/// use payroll_engine::models::{ResolvedDeal, WeekendPolicy};
/// use chrono::{NaiveDate, NaiveDateTime, Weekday};
///
/// let deal = |row, closer: &str, ts: &str| ResolvedDeal {
///     row,
///     closer: closer.to_string(),
///     enroller: String::new(),
///     timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").ok(),
/// };
/// let deals = vec![
///     deal(1, "Ada Jones", "2025-08-01 09:00:00"),
///     deal(2, "Bo Diaz", "2025-08-02 08:00:00"),
///     deal(3, "Ada Jones", "2025-08-02 10:00:00"),
/// ];
/// let policy = WeekendPolicy::Weekday { weekday: Weekday::Sat };
///
/// let stats = aggregate_closer_deals(&deals, &policy);
///
/// assert_eq!(stats["Ada Jones"].deal_count, 2);
/// assert_eq!(stats["Ada Jones"].weekend_deals, 1);
/// assert_eq!(stats["Ada Jones"].first_deal_days, 1);
/// assert_eq!(stats["Bo Diaz"].first_deal_days, 1);
/// ```
pub fn aggregate_closer_deals(
    deals: &[ResolvedDeal],
    weekend: &WeekendPolicy,
) -> BTreeMap<String, CloserDealStats> {
    let mut stats: BTreeMap<String, CloserDealStats> = BTreeMap::new();

    for deal in deals.iter().filter(|deal| !deal.closer.is_empty()) {
        let entry = stats.entry(deal.closer.clone()).or_default();
        entry.deal_count += 1;
        if deal.date().is_some_and(|date| weekend.is_weekend(date)) {
            entry.weekend_deals += 1;
        }
    }

    for closer in first_deal_of_day_closers(deals).into_values() {
        stats.entry(closer.to_string()).or_default().first_deal_days += 1;
    }

    stats
}

/// Returns the closer of the earliest deal on each calendar day.
///
/// Only deals with a parsed timestamp take part. When several deals share the
/// earliest timestamp of a day, the one with the lowest row number wins. A day
/// whose earliest deal has no closer credits nobody.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::first_deal_of_day_closers;
/// use payroll_engine::models::ResolvedDeal;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let ts = NaiveDateTime::parse_from_str("2025-08-01 09:00:00", "%Y-%m-%d %H:%M:%S").ok();
/// let deals = vec![
///     ResolvedDeal { row: 1, closer: "Bo Diaz".into(), enroller: String::new(), timestamp: ts },
///     ResolvedDeal { row: 2, closer: "Ada Jones".into(), enroller: String::new(), timestamp: ts },
/// ];
///
/// let firsts = first_deal_of_day_closers(&deals);
/// let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// assert_eq!(firsts[&day], "Bo Diaz");
/// ```
pub fn first_deal_of_day_closers(deals: &[ResolvedDeal]) -> BTreeMap<NaiveDate, &str> {
    let mut earliest: HashMap<NaiveDate, (NaiveDateTime, usize, &str)> = HashMap::new();

    for deal in deals {
        let Some(timestamp) = deal.timestamp else {
            continue;
        };
        let candidate = (timestamp, deal.row, deal.closer.as_str());
        earliest
            .entry(timestamp.date())
            .and_modify(|current| {
                if (candidate.0, candidate.1) < (current.0, current.1) {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    earliest
        .into_iter()
        .filter(|(_, (_, _, closer))| !closer.is_empty())
        .map(|(day, (_, _, closer))| (day, closer))
        .collect()
}

/// Counts submitted deals per enroller.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate_enroller_submissions;
/// use payroll_engine::models::ResolvedDeal;
///
/// let deal = |row, enroller: &str| ResolvedDeal {
///     row,
///     closer: String::new(),
///     enroller: enroller.to_string(),
///     timestamp: None,
/// };
/// let deals = vec![deal(1, "Ada Jones"), deal(2, "Ada Jones"), deal(3, "")];
///
/// let submissions = aggregate_enroller_submissions(&deals);
/// assert_eq!(submissions["Ada Jones"], 2);
/// assert_eq!(submissions.len(), 1);
/// ```
pub fn aggregate_enroller_submissions(deals: &[ResolvedDeal]) -> BTreeMap<String, u32> {
    let mut submissions: BTreeMap<String, u32> = BTreeMap::new();
    for deal in deals.iter().filter(|deal| !deal.enroller.is_empty()) {
        *submissions.entry(deal.enroller.clone()).or_default() += 1;
    }
    submissions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn at(s: &str) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn closed(row: usize, closer: &str, timestamp: Option<NaiveDateTime>) -> ResolvedDeal {
        ResolvedDeal {
            row,
            closer: closer.to_string(),
            enroller: String::new(),
            timestamp,
        }
    }

    fn saturday_policy() -> WeekendPolicy {
        WeekendPolicy::FixedDate {
            date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
        }
    }

    #[test]
    fn test_deal_count_per_closer() {
        let deals = vec![
            closed(1, "Ada Jones", at("2025-07-28 09:00:00")),
            closed(2, "Ada Jones", at("2025-07-29 09:00:00")),
            closed(3, "Bo Diaz", at("2025-07-29 10:00:00")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Ada Jones"].deal_count, 2);
        assert_eq!(stats["Bo Diaz"].deal_count, 1);
    }

    #[test]
    fn test_weekend_deals_use_the_date_bucket() {
        let deals = vec![
            closed(1, "Ada Jones", at("2025-08-02 00:00:00")),
            closed(2, "Ada Jones", at("2025-08-02 23:59:59")),
            closed(3, "Ada Jones", at("2025-08-01 23:59:59")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Ada Jones"].deal_count, 3);
        assert_eq!(stats["Ada Jones"].weekend_deals, 2);
    }

    #[test]
    fn test_fixed_date_policy_ignores_other_saturdays() {
        let deals = vec![
            closed(1, "Ada Jones", at("2025-08-02 12:00:00")),
            closed(2, "Ada Jones", at("2025-08-09 12:00:00")),
        ];

        let fixed = aggregate_closer_deals(&deals, &saturday_policy());
        let any_saturday = aggregate_closer_deals(
            &deals,
            &WeekendPolicy::Weekday {
                weekday: Weekday::Sat,
            },
        );

        assert_eq!(fixed["Ada Jones"].weekend_deals, 1);
        assert_eq!(any_saturday["Ada Jones"].weekend_deals, 2);
    }

    #[test]
    fn test_unparseable_dates_count_toward_raw_deals_only() {
        let deals = vec![
            closed(1, "Ada Jones", None),
            closed(2, "Ada Jones", at("2025-08-02 09:00:00")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Ada Jones"].deal_count, 2);
        assert_eq!(stats["Ada Jones"].weekend_deals, 1);
        assert_eq!(stats["Ada Jones"].first_deal_days, 1);
    }

    #[test]
    fn test_undated_deal_never_earns_first_deal_of_day() {
        let deals = vec![
            closed(1, "Bo Diaz", None),
            closed(2, "Ada Jones", at("2025-08-01 09:00:00")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Bo Diaz"].first_deal_days, 0);
        assert_eq!(stats["Ada Jones"].first_deal_days, 1);
    }

    #[test]
    fn test_first_deal_of_day_is_per_distinct_day() {
        let deals = vec![
            closed(1, "Ada Jones", at("2025-07-28 10:00:00")),
            closed(2, "Bo Diaz", at("2025-07-28 08:30:00")),
            closed(3, "Ada Jones", at("2025-07-29 07:00:00")),
            closed(4, "Ada Jones", at("2025-07-29 07:30:00")),
            closed(5, "Ada Jones", at("2025-07-30 11:00:00")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Bo Diaz"].first_deal_days, 1);
        assert_eq!(stats["Ada Jones"].first_deal_days, 2);
    }

    #[test]
    fn test_first_deal_tie_goes_to_lowest_row() {
        let deals = vec![
            closed(7, "Bo Diaz", at("2025-07-28 08:00:00")),
            closed(3, "Ada Jones", at("2025-07-28 08:00:00")),
        ];

        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert_eq!(stats["Ada Jones"].first_deal_days, 1);
        assert_eq!(stats["Bo Diaz"].first_deal_days, 0);
    }

    #[test]
    fn test_first_deal_without_closer_credits_nobody() {
        let deals = vec![
            closed(1, "", at("2025-07-28 08:00:00")),
            closed(2, "Ada Jones", at("2025-07-28 09:00:00")),
        ];

        let firsts = first_deal_of_day_closers(&deals);
        let stats = aggregate_closer_deals(&deals, &saturday_policy());

        assert!(firsts.is_empty());
        assert_eq!(stats["Ada Jones"].first_deal_days, 0);
        assert!(!stats.contains_key(""));
    }

    #[test]
    fn test_enroller_submissions_ignore_closers() {
        let deals = vec![
            ResolvedDeal {
                row: 1,
                closer: "Ada Jones".to_string(),
                enroller: "Bo Diaz".to_string(),
                timestamp: None,
            },
            ResolvedDeal {
                row: 2,
                closer: "Bo Diaz".to_string(),
                enroller: "Bo Diaz".to_string(),
                timestamp: at("2025-08-02 09:00:00"),
            },
        ];

        let submissions = aggregate_enroller_submissions(&deals);

        assert_eq!(submissions["Bo Diaz"], 2);
        assert!(!submissions.contains_key("Ada Jones"));
    }
}
