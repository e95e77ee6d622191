//! Closer hourly rate tier lookup.
//!
//! A closer's hourly rate rises with the number of deals closed in the week.
//! Each tier has an inclusive lower bound on the deal count; the highest tier
//! the count reaches applies, and the base rate applies below every tier.

use rust_decimal::Decimal;

use crate::config::CloserRules;
use crate::models::AuditStep;

/// The result of a closer hourly rate lookup, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The applicable hourly rate.
    pub rate: Decimal,
    /// The lower bound of the tier that applied, or `None` for the base rate.
    pub tier_min_deals: Option<u32>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines a closer's hourly rate from their weekly deal count.
///
/// # Arguments
///
/// * `agent` - The closer the rate is for (recorded on the audit step)
/// * `deal_count` - Deals closed in the week
/// * `rules` - The closer pay rules
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::closer_hourly_rate;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
/// let rules = loader.config().closer();
///
/// assert_eq!(closer_hourly_rate("Ada Jones", 15, rules, 1).rate, Decimal::from(22));
/// assert_eq!(closer_hourly_rate("Ada Jones", 14, rules, 1).rate, Decimal::from(20));
/// assert_eq!(closer_hourly_rate("Ada Jones", 0, rules, 1).rate, Decimal::from(13));
/// ```
pub fn closer_hourly_rate(
    agent: &str,
    deal_count: u32,
    rules: &CloserRules,
    step_number: u32,
) -> HourlyRateResult {
    let tier = rules
        .hourly_rate_tiers
        .iter()
        .filter(|tier| deal_count >= tier.min_deals)
        .max_by_key(|tier| tier.min_deals);

    let (rate, tier_min_deals, reasoning) = match tier {
        Some(tier) => (
            tier.rate,
            Some(tier.min_deals),
            format!(
                "{} deals reaches the {}+ deal tier: ${}/hour",
                deal_count,
                tier.min_deals,
                tier.rate.normalize()
            ),
        ),
        None => (
            rules.base_hourly_rate,
            None,
            format!(
                "{} deals is below every tier: base rate ${}/hour",
                deal_count,
                rules.base_hourly_rate.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "closer_hourly_rate".to_string(),
        rule_name: "Closer Hourly Rate Tier".to_string(),
        agent: agent.to_string(),
        input: serde_json::json!({
            "deal_count": deal_count
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "tier_min_deals": tier_min_deals
        }),
        reasoning,
    };

    HourlyRateResult {
        rate,
        tier_min_deals,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BonusSlot, BonusSlots, DealRateTier, HoursBonusTier};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn closer_rules() -> CloserRules {
        CloserRules {
            base_hourly_rate: dec("13"),
            hourly_rate_tiers: vec![
                DealRateTier { min_deals: 4, rate: dec("15") },
                DealRateTier { min_deals: 8, rate: dec("18") },
                DealRateTier { min_deals: 12, rate: dec("20") },
                DealRateTier { min_deals: 15, rate: dec("22") },
            ],
            regular_deal_rate: dec("35"),
            weekend_deal_rate: dec("50"),
            hours_bonus_tiers: vec![HoursBonusTier {
                min_hours: dec("40"),
                bonus: dec("50"),
            }],
            first_deal_bonus: dec("25"),
            bonus_slots: BonusSlots {
                slot_one: BonusSlot {
                    label: "Bonus Count x25".to_string(),
                    multiplier: dec("25"),
                },
                slot_two: BonusSlot {
                    label: "Bonus Count x50".to_string(),
                    multiplier: dec("50"),
                },
            },
        }
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let rules = closer_rules();
        let cases = [
            (0, "13"),
            (3, "13"),
            (4, "15"),
            (7, "15"),
            (8, "18"),
            (11, "18"),
            (12, "20"),
            (14, "20"),
            (15, "22"),
            (40, "22"),
        ];
        for (deals, expected) in cases {
            assert_eq!(
                closer_hourly_rate("Ada Jones", deals, &rules, 1).rate,
                dec(expected),
                "deal count {}",
                deals
            );
        }
    }

    #[test]
    fn test_unsorted_tiers_still_pick_highest_reached() {
        // Tiers above are deliberately listed lowest first
        let result = closer_hourly_rate("Ada Jones", 13, &closer_rules(), 1);
        assert_eq!(result.rate, dec("20"));
        assert_eq!(result.tier_min_deals, Some(12));
    }

    #[test]
    fn test_base_rate_has_no_tier() {
        let result = closer_hourly_rate("Ada Jones", 2, &closer_rules(), 1);
        assert_eq!(result.tier_min_deals, None);
        assert!(result.audit_step.reasoning.contains("base rate"));
    }

    #[test]
    fn test_audit_step_records_lookup() {
        let result = closer_hourly_rate("Ada Jones", 16, &closer_rules(), 3);
        let step = &result.audit_step;

        assert_eq!(step.step_number, 3);
        assert_eq!(step.rule_id, "closer_hourly_rate");
        assert_eq!(step.agent, "Ada Jones");
        assert_eq!(step.input["deal_count"], 16);
        assert_eq!(step.output["rate"], "22");
        assert_eq!(step.output["tier_min_deals"], 15);
    }
}
