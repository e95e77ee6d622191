//! Configuration types for payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::WeekendSetting;

/// Metadata about the pay plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanMetadata {
    /// A short identifier for the plan.
    pub code: String,
    /// The human-readable name of the plan.
    pub name: String,
    /// The version or effective date of the plan.
    pub version: String,
}

/// An hourly rate that applies from a minimum weekly deal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DealRateTier {
    /// Inclusive lower bound on the deal count.
    pub min_deals: u32,
    /// The hourly rate for this tier.
    pub rate: Decimal,
}

/// A flat bonus that applies from a minimum number of hours worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HoursBonusTier {
    /// Inclusive lower bound on hours worked.
    pub min_hours: Decimal,
    /// The flat bonus for this tier.
    pub bonus: Decimal,
}

/// An editable bonus-count column of the export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BonusSlot {
    /// The column header.
    pub label: String,
    /// The amount paid per unit entered in the column.
    pub multiplier: Decimal,
}

/// The two editable bonus-count columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BonusSlots {
    /// First slot.
    pub slot_one: BonusSlot,
    /// Second slot.
    pub slot_two: BonusSlot,
}

/// Pay rules for closers, from closer.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CloserRules {
    /// Hourly rate when no tier applies.
    pub base_hourly_rate: Decimal,
    /// Hourly rate tiers (sorted highest `min_deals` first on load).
    pub hourly_rate_tiers: Vec<DealRateTier>,
    /// Pay per non-weekend deal.
    pub regular_deal_rate: Decimal,
    /// Pay per weekend deal.
    pub weekend_deal_rate: Decimal,
    /// Hours bonus tiers (sorted highest `min_hours` first on load).
    pub hours_bonus_tiers: Vec<HoursBonusTier>,
    /// Bonus per first-deal-of-the-day.
    pub first_deal_bonus: Decimal,
    /// Editable bonus-count columns.
    pub bonus_slots: BonusSlots,
}

/// Pay rules for enrollers, from enroller.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollerRules {
    /// Flat hourly rate.
    pub hourly_rate: Decimal,
    /// Pay per submitted deal.
    pub submission_rate: Decimal,
}

/// Weekend section of matching.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekendFile {
    /// Weekday name (e.g. "saturday").
    pub weekday: String,
    /// Setting applied when a run does not request one.
    pub default_setting: WeekendSetting,
}

/// matching.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingFile {
    /// Minimum similarity score (0-100) for two names to reconcile.
    pub threshold: u8,
    /// Weekend settings.
    pub weekend: WeekendFile,
}

/// Name matching and weekend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Minimum similarity score (0-100) for two names to reconcile.
    pub threshold: u8,
    /// The premium weekday.
    pub weekend_weekday: Weekday,
    /// Setting applied when a run does not request one.
    pub default_weekend: WeekendSetting,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: PlanMetadata,
    closer: CloserRules,
    enroller: EnrollerRules,
    matching: MatchingConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    ///
    /// Tier tables are sorted so that the highest threshold comes first.
    pub fn new(
        metadata: PlanMetadata,
        closer: CloserRules,
        enroller: EnrollerRules,
        matching: MatchingConfig,
    ) -> Self {
        let mut closer = closer;
        closer
            .hourly_rate_tiers
            .sort_by(|a, b| b.min_deals.cmp(&a.min_deals));
        closer
            .hours_bonus_tiers
            .sort_by(|a, b| b.min_hours.cmp(&a.min_hours));
        Self {
            metadata,
            closer,
            enroller,
            matching,
        }
    }

    /// Returns the plan metadata.
    pub fn plan(&self) -> &PlanMetadata {
        &self.metadata
    }

    /// Returns the closer pay rules.
    pub fn closer(&self) -> &CloserRules {
        &self.closer
    }

    /// Returns the enroller pay rules.
    pub fn enroller(&self) -> &EnrollerRules {
        &self.enroller
    }

    /// Returns the matching and weekend settings.
    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }
}
