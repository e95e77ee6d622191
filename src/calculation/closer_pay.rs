//! Closer payroll line calculation.
//!
//! Combines the hourly rate tier, per-deal pay, the hours bonus and the
//! first deal of the day bonus into a single [`PayrollLine`].

use rust_decimal::Decimal;

use crate::config::{BonusSlots, CloserRules};
use crate::models::{AuditStep, CloserDealStats, ManualAdjustments, PayrollLine, Role};

use super::{calculate_hours_bonus, closer_hourly_rate};

/// The result of a closer pay calculation.
#[derive(Debug, Clone)]
pub struct CloserPayResult {
    /// The computed payroll line.
    pub line: PayrollLine,
    /// Audit steps in evaluation order.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the pay contributed by manual adjustments.
///
/// `manual_bonus + slot_one_count * slot_one.multiplier + slot_two_count * slot_two.multiplier`
pub fn adjustments_pay(adjustments: &ManualAdjustments, slots: &BonusSlots) -> Decimal {
    adjustments.manual_bonus
        + adjustments.slot_one_count * slots.slot_one.multiplier
        + adjustments.slot_two_count * slots.slot_two.multiplier
}

/// Returns cost per acquisition: `total_pay / deal_count`, zero with no deals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::cost_per_acquisition;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cost_per_acquisition(Decimal::from(100), 4), Decimal::from(25));
/// assert_eq!(cost_per_acquisition(Decimal::from(100), 0), Decimal::ZERO);
/// ```
pub fn cost_per_acquisition(total_pay: Decimal, deal_count: u32) -> Decimal {
    if deal_count > 0 {
        total_pay / Decimal::from(deal_count)
    } else {
        Decimal::ZERO
    }
}

/// Calculates the payroll line for a closer.
///
/// # Arguments
///
/// * `agent` - Canonical closer name
/// * `hours` - Whole hours worked in the week
/// * `stats` - The closer's deal statistics
/// * `rules` - The closer pay rules
/// * `step_number` - The step number of the first audit step produced
///
/// # Returns
///
/// The payroll line and four audit steps: hourly rate tier, deal pay, hours
/// bonus and the line total.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_closer_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::CloserDealStats;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
/// let stats = CloserDealStats { deal_count: 16, weekend_deals: 3, first_deal_days: 2 };
///
/// let result = calculate_closer_pay("John Smith", Decimal::from(45), &stats, loader.config().closer(), 1);
///
/// // 45h x $22 + 13 x $35 + 3 x $50 + $50 hours bonus + 2 x $25 first deal bonus
/// assert_eq!(result.line.total_pay, Decimal::from(1695));
/// assert_eq!(result.line.cpa, Decimal::from_str("105.9375").unwrap());
/// ```
pub fn calculate_closer_pay(
    agent: &str,
    hours: Decimal,
    stats: &CloserDealStats,
    rules: &CloserRules,
    step_number: u32,
) -> CloserPayResult {
    let mut audit_steps = Vec::with_capacity(4);

    let rate_result = closer_hourly_rate(agent, stats.deal_count, rules, step_number);
    let hourly_rate = rate_result.rate;
    audit_steps.push(rate_result.audit_step);

    let hourly_pay = hourly_rate * hours;

    let weekend_deals = stats.weekend_deals.min(stats.deal_count);
    let regular_deals = stats.deal_count - weekend_deals;
    let regular_deals_pay = Decimal::from(regular_deals) * rules.regular_deal_rate;
    let weekend_deals_pay = Decimal::from(weekend_deals) * rules.weekend_deal_rate;
    let first_deal_bonus = Decimal::from(stats.first_deal_days) * rules.first_deal_bonus;

    audit_steps.push(AuditStep {
        step_number: step_number + 1,
        rule_id: "closer_deal_pay".to_string(),
        rule_name: "Closer Deal Pay".to_string(),
        agent: agent.to_string(),
        input: serde_json::json!({
            "deal_count": stats.deal_count,
            "weekend_deals": weekend_deals,
            "first_deal_days": stats.first_deal_days,
            "regular_deal_rate": rules.regular_deal_rate.normalize().to_string(),
            "weekend_deal_rate": rules.weekend_deal_rate.normalize().to_string(),
            "first_deal_bonus_rate": rules.first_deal_bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_deals": regular_deals,
            "regular_deals_pay": regular_deals_pay.normalize().to_string(),
            "weekend_deals_pay": weekend_deals_pay.normalize().to_string(),
            "first_deal_bonus": first_deal_bonus.normalize().to_string()
        }),
        reasoning: format!(
            "{} regular × ${} = ${}; {} weekend × ${} = ${}; {} first deals × ${} = ${}",
            regular_deals,
            rules.regular_deal_rate.normalize(),
            regular_deals_pay.normalize(),
            weekend_deals,
            rules.weekend_deal_rate.normalize(),
            weekend_deals_pay.normalize(),
            stats.first_deal_days,
            rules.first_deal_bonus.normalize(),
            first_deal_bonus.normalize()
        ),
    });

    let bonus_result = calculate_hours_bonus(agent, hours, rules, step_number + 2);
    let hours_bonus = bonus_result.bonus;
    audit_steps.push(bonus_result.audit_step);

    let adjustments = ManualAdjustments::default();
    let total_pay = hourly_pay
        + regular_deals_pay
        + weekend_deals_pay
        + hours_bonus
        + first_deal_bonus
        + adjustments_pay(&adjustments, &rules.bonus_slots);
    let cpa = cost_per_acquisition(total_pay, stats.deal_count);

    audit_steps.push(AuditStep {
        step_number: step_number + 3,
        rule_id: "closer_line_total".to_string(),
        rule_name: "Closer Total Pay".to_string(),
        agent: agent.to_string(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "hourly_pay": hourly_pay.normalize().to_string(),
            "hours_bonus": hours_bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_pay": total_pay.normalize().to_string(),
            "cpa": cpa.normalize().to_string()
        }),
        reasoning: format!(
            "{}h × ${} + ${} deal pay + ${} bonuses = ${}",
            hours.normalize(),
            hourly_rate.normalize(),
            (regular_deals_pay + weekend_deals_pay).normalize(),
            (hours_bonus + first_deal_bonus).normalize(),
            total_pay.normalize()
        ),
    });

    let line = PayrollLine {
        agent: agent.to_string(),
        role: Role::Closer,
        deal_count: stats.deal_count,
        weekend_deals,
        first_deal_count: stats.first_deal_days,
        man_hours: hours,
        hourly_rate,
        hourly_pay,
        regular_deals,
        regular_deals_pay,
        weekend_deals_pay,
        hours_bonus,
        first_deal_bonus,
        adjustments,
        total_pay,
        cpa,
    };

    CloserPayResult { line, audit_steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BonusSlot, DealRateTier, HoursBonusTier};
    use std::str::FromStr;

    /// Helper function to create Decimal values from strings
    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn closer_rules() -> CloserRules {
        CloserRules {
            base_hourly_rate: dec("13"),
            hourly_rate_tiers: vec![
                DealRateTier { min_deals: 15, rate: dec("22") },
                DealRateTier { min_deals: 12, rate: dec("20") },
                DealRateTier { min_deals: 8, rate: dec("18") },
                DealRateTier { min_deals: 4, rate: dec("15") },
            ],
            regular_deal_rate: dec("35"),
            weekend_deal_rate: dec("50"),
            hours_bonus_tiers: vec![
                HoursBonusTier { min_hours: dec("60"), bonus: dec("100") },
                HoursBonusTier { min_hours: dec("50"), bonus: dec("75") },
                HoursBonusTier { min_hours: dec("40"), bonus: dec("50") },
            ],
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

    fn stats(deal_count: u32, weekend_deals: u32, first_deal_days: u32) -> CloserDealStats {
        CloserDealStats {
            deal_count,
            weekend_deals,
            first_deal_days,
        }
    }

    #[test]
    fn test_full_week_line() {
        let result = calculate_closer_pay("John Smith", dec("45"), &stats(16, 3, 2), &closer_rules(), 1);
        let line = &result.line;

        assert_eq!(line.hourly_rate, dec("22"));
        assert_eq!(line.hourly_pay, dec("990"));
        assert_eq!(line.regular_deals, 13);
        assert_eq!(line.regular_deals_pay, dec("455"));
        assert_eq!(line.weekend_deals_pay, dec("150"));
        assert_eq!(line.hours_bonus, dec("50"));
        assert_eq!(line.first_deal_bonus, dec("50"));
        assert_eq!(line.total_pay, dec("1695"));
        assert_eq!(line.cpa, dec("105.9375"));
        assert_eq!(line.role, Role::Closer);
    }

    #[test]
    fn test_no_deals_gives_zero_cpa_and_base_rate() {
        let result = calculate_closer_pay("Ada Jones", dec("10"), &stats(0, 0, 0), &closer_rules(), 1);

        assert_eq!(result.line.hourly_rate, dec("13"));
        assert_eq!(result.line.total_pay, dec("130"));
        assert_eq!(result.line.cpa, Decimal::ZERO);
    }

    #[test]
    fn test_all_deals_on_weekend() {
        let result = calculate_closer_pay("Ada Jones", dec("8"), &stats(4, 4, 0), &closer_rules(), 1);

        assert_eq!(result.line.regular_deals, 0);
        assert_eq!(result.line.regular_deals_pay, Decimal::ZERO);
        assert_eq!(result.line.weekend_deals_pay, dec("200"));
        // 8h x $15 + 4 x $50
        assert_eq!(result.line.total_pay, dec("320"));
    }

    #[test]
    fn test_manual_adjustments_default_to_zero() {
        let result = calculate_closer_pay("Ada Jones", dec("8"), &stats(1, 0, 0), &closer_rules(), 1);
        assert_eq!(result.line.adjustments, ManualAdjustments::default());
    }

    #[test]
    fn test_adjustments_pay_uses_slot_multipliers() {
        let adjustments = ManualAdjustments {
            manual_bonus: dec("10"),
            slot_one_count: dec("2"),
            slot_two_count: dec("1"),
        };
        // 10 + 2 x 25 + 1 x 50
        assert_eq!(
            adjustments_pay(&adjustments, &closer_rules().bonus_slots),
            dec("110")
        );
    }

    #[test]
    fn test_audit_steps_in_order() {
        let result = calculate_closer_pay("Ada Jones", dec("41"), &stats(9, 1, 1), &closer_rules(), 5);
        let ids: Vec<&str> = result
            .audit_steps
            .iter()
            .map(|step| step.rule_id.as_str())
            .collect();
        let numbers: Vec<u32> = result.audit_steps.iter().map(|step| step.step_number).collect();

        assert_eq!(
            ids,
            vec![
                "closer_hourly_rate",
                "closer_deal_pay",
                "closer_hours_bonus",
                "closer_line_total"
            ]
        );
        assert_eq!(numbers, vec![5, 6, 7, 8]);
        assert!(result.audit_steps.iter().all(|step| step.agent == "Ada Jones"));
    }

    #[test]
    fn test_cost_per_acquisition_keeps_precision() {
        assert_eq!(cost_per_acquisition(dec("100"), 3), dec("100") / dec("3"));
    }
}
