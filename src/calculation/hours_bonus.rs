//! Closer hours bonus.

use rust_decimal::Decimal;

use crate::config::CloserRules;
use crate::models::AuditStep;

/// The result of an hours bonus calculation, including the bonus and audit step.
#[derive(Debug, Clone)]
pub struct HoursBonusResult {
    /// The flat bonus earned.
    pub bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Determines the flat hours bonus for a closer.
///
/// The highest tier whose (inclusive) minimum the hours reach applies. Below
/// every tier the bonus is zero. The bonus is flat, not per hour.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_hours_bonus;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
/// let rules = loader.config().closer();
///
/// let result = calculate_hours_bonus("Ada Jones", Decimal::from(40), rules, 2);
/// assert_eq!(result.bonus, Decimal::from(50));
/// ```
pub fn calculate_hours_bonus(
    agent: &str,
    hours: Decimal,
    rules: &CloserRules,
    step_number: u32,
) -> HoursBonusResult {
    let tier = rules
        .hours_bonus_tiers
        .iter()
        .filter(|tier| hours >= tier.min_hours)
        .max_by_key(|tier| tier.min_hours);

    let bonus = tier.map(|tier| tier.bonus).unwrap_or(Decimal::ZERO);
    let reasoning = match tier {
        Some(tier) => format!(
            "{} hours reaches the {}+ hour tier: ${} bonus",
            hours.normalize(),
            tier.min_hours.normalize(),
            tier.bonus.normalize()
        ),
        None => format!("{} hours is below every bonus tier", hours.normalize()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "closer_hours_bonus".to_string(),
        rule_name: "Closer Hours Bonus".to_string(),
        agent: agent.to_string(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "bonus": bonus.normalize().to_string(),
            "tier_min_hours": tier.map(|tier| tier.min_hours.normalize().to_string())
        }),
        reasoning,
    };

    HoursBonusResult { bonus, audit_step }
}
