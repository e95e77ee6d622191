//! Payroll line model.
//!
//! A [`PayrollLine`] is one output row per agent per role, purely derived
//! from the agent's hours and deal statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Role;

/// Values entered by hand after export.
///
/// The engine always produces zero adjustments; the fields exist so that the
/// total pay formula has the same shape inside and outside the spreadsheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAdjustments {
    /// A free-form bonus amount.
    pub manual_bonus: Decimal,
    /// Count paid at the first bonus slot's multiplier.
    pub slot_one_count: Decimal,
    /// Count paid at the second bonus slot's multiplier.
    pub slot_two_count: Decimal,
}

/// One payroll row for an agent in a given role.
///
/// For enrollers, `deal_count` holds submitted deals and `regular_deals_pay`
/// holds the per-submission pay; the weekend, hours bonus and first deal
/// fields are always zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ManualAdjustments, PayrollLine, Role};
/// use rust_decimal::Decimal;
///
/// let line = PayrollLine {
///     agent: "Ada Jones".to_string(),
///     role: Role::Enroller,
///     deal_count: 0,
///     weekend_deals: 0,
///     first_deal_count: 0,
///     man_hours: Decimal::from(10),
///     hourly_rate: Decimal::from(18),
///     hourly_pay: Decimal::from(180),
///     regular_deals: 0,
///     regular_deals_pay: Decimal::ZERO,
///     weekend_deals_pay: Decimal::ZERO,
///     hours_bonus: Decimal::ZERO,
///     first_deal_bonus: Decimal::ZERO,
///     adjustments: ManualAdjustments::default(),
///     total_pay: Decimal::from(180),
///     cpa: Decimal::ZERO,
/// };
/// assert_eq!(line.total_deal_pay(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// Canonical agent name.
    pub agent: String,
    /// The role this line pays.
    pub role: Role,
    /// Closed deals (closers) or submitted deals (enrollers).
    pub deal_count: u32,
    /// Deals on the weekend reference day.
    pub weekend_deals: u32,
    /// Days on which the agent closed the first deal company-wide.
    pub first_deal_count: u32,
    /// Whole hours worked.
    pub man_hours: Decimal,
    /// The applicable hourly rate.
    pub hourly_rate: Decimal,
    /// `hourly_rate * man_hours`.
    pub hourly_pay: Decimal,
    /// Deals paid at the regular rate.
    pub regular_deals: u32,
    /// Pay for regular deals (or submissions for enrollers).
    pub regular_deals_pay: Decimal,
    /// Pay for weekend deals.
    pub weekend_deals_pay: Decimal,
    /// Flat bonus by hours worked.
    pub hours_bonus: Decimal,
    /// Bonus for first deals of the day.
    pub first_deal_bonus: Decimal,
    /// Manually entered values (zero from the engine).
    pub adjustments: ManualAdjustments,
    /// Sum of all pay components.
    pub total_pay: Decimal,
    /// Cost per acquisition: `total_pay / deal_count`, or zero with no deals.
    pub cpa: Decimal,
}

impl PayrollLine {
    /// Returns regular plus weekend deal pay.
    pub fn total_deal_pay(&self) -> Decimal {
        self.regular_deals_pay + self.weekend_deals_pay
    }

    /// Returns hours bonus plus first deal bonus.
    pub fn total_bonus_pay(&self) -> Decimal {
        self.hours_bonus + self.first_deal_bonus
    }
}
