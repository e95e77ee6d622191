//! Calculation logic for the Weekly Payroll Engine.
//!
//! This module contains every stage of a payroll run: name normalization,
//! duration and deal date parsing, fuzzy roster matching and identity
//! resolution, weekend policy resolution, deal aggregation, the closer and
//! enroller pay rules, and report assembly. [`calculate_weekly_payroll`]
//! runs them in order.

mod closer_pay;
mod deal_aggregation;
mod deal_date;
mod enroller_pay;
mod fuzzy_match;
mod hourly_rate;
mod hours_bonus;
mod identity;
mod man_hours;
mod name_normalizer;
mod payroll_run;
mod report_assembly;
mod weekend;

pub use closer_pay::{CloserPayResult, adjustments_pay, calculate_closer_pay, cost_per_acquisition};
pub use deal_aggregation::{
    aggregate_closer_deals, aggregate_enroller_submissions, first_deal_of_day_closers,
};
pub use deal_date::parse_deal_timestamp;
pub use enroller_pay::{EnrollerPayResult, calculate_enroller_pay};
pub use fuzzy_match::{
    DEFAULT_MATCH_THRESHOLD, MatchOutcome, ScoredCandidate, best_match, match_name, similarity,
};
pub use hourly_rate::{HourlyRateResult, closer_hourly_rate};
pub use hours_bonus::{HoursBonusResult, calculate_hours_bonus};
pub use identity::{RosterResolution, distinct_names, resolve_roster};
pub use man_hours::{man_hours, parse_duration_hours};
pub use name_normalizer::normalize_name;
pub use payroll_run::{
    RunOptions, WARNING_EMPTY_NAME, WARNING_MALFORMED_DURATION, WARNING_MERGED_NAMES,
    WARNING_UNMATCHED_NAME, WARNING_UNPARSEABLE_DATE, calculate_weekly_payroll,
};
pub use report_assembly::{assemble_report, report_order};
pub use weekend::{most_recent_weekday, resolve_weekend_policy};
