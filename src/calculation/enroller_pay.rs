//! Enroller payroll line calculation.

use rust_decimal::Decimal;

use crate::config::{BonusSlots, EnrollerRules};
use crate::models::{AuditStep, ManualAdjustments, PayrollLine, Role};

use super::{adjustments_pay, cost_per_acquisition};

/// The result of an enroller pay calculation, including the line and audit step.
#[derive(Debug, Clone)]
pub struct EnrollerPayResult {
    /// The computed payroll line.
    pub line: PayrollLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the payroll line for an enroller.
///
/// Enrollers earn a flat hourly rate plus a fixed amount per submitted deal.
/// The submission pay is stored in the regular deals pay slot so both roles
/// share one line layout; weekend pay and both bonuses stay zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_enroller_pay;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
/// let config = loader.config();
///
/// let result = calculate_enroller_pay(
///     "Ada Jones",
///     Decimal::from(20),
///     6,
///     config.enroller(),
///     &config.closer().bonus_slots,
///     1,
/// );
/// // 20h x $18 + 6 x $5
/// assert_eq!(result.line.total_pay, Decimal::from(390));
/// assert_eq!(result.line.cpa, Decimal::from(65));
/// ```
pub fn calculate_enroller_pay(
    agent: &str,
    hours: Decimal,
    submitted_deals: u32,
    rules: &EnrollerRules,
    slots: &BonusSlots,
    step_number: u32,
) -> EnrollerPayResult {
    let hourly_rate = rules.hourly_rate;
    let hourly_pay = hourly_rate * hours;
    let submission_pay = Decimal::from(submitted_deals) * rules.submission_rate;

    let adjustments = ManualAdjustments::default();
    let total_pay = hourly_pay + submission_pay + adjustments_pay(&adjustments, slots);
    let cpa = cost_per_acquisition(total_pay, submitted_deals);

    let audit_step = AuditStep {
        step_number,
        rule_id: "enroller_pay".to_string(),
        rule_name: "Enroller Pay".to_string(),
        agent: agent.to_string(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "submitted_deals": submitted_deals,
            "hourly_rate": hourly_rate.normalize().to_string(),
            "submission_rate": rules.submission_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_pay": hourly_pay.normalize().to_string(),
            "submission_pay": submission_pay.normalize().to_string(),
            "total_pay": total_pay.normalize().to_string(),
            "cpa": cpa.normalize().to_string()
        }),
        reasoning: format!(
            "{}h × ${} + {} submissions × ${} = ${}",
            hours.normalize(),
            hourly_rate.normalize(),
            submitted_deals,
            rules.submission_rate.normalize(),
            total_pay.normalize()
        ),
    };

    let line = PayrollLine {
        agent: agent.to_string(),
        role: Role::Enroller,
        deal_count: submitted_deals,
        weekend_deals: 0,
        first_deal_count: 0,
        man_hours: hours,
        hourly_rate,
        hourly_pay,
        regular_deals: submitted_deals,
        regular_deals_pay: submission_pay,
        weekend_deals_pay: Decimal::ZERO,
        hours_bonus: Decimal::ZERO,
        first_deal_bonus: Decimal::ZERO,
        adjustments,
        total_pay,
        cpa,
    };

    EnrollerPayResult { line, audit_step }
}
