//! Live spreadsheet formulas for the export.
//!
//! The export carries formulas for the two derived columns so that values an
//! operator types into the manual columns (Manual Bonus and the two bonus
//! count slots) flow into Total Pay and CPA without recomputation. Worksheet
//! row 1 is the header; the first agent is on row 2.

use rust_decimal::Decimal;

use crate::config::BonusSlots;

use super::ReportColumn::{
    self, BonusSlotOne, BonusSlotTwo, DealCount, FirstDealBonus, HourlyPay, HoursBonus,
    ManualBonus, RegularDealsPay, SaturdayDealsPay, TotalPay,
};

/// Worksheet row of the first agent.
pub const FIRST_DATA_ROW: usize = 2;

/// Renders the Total Pay and CPA formulas for worksheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaTemplate {
    slot_one_label: String,
    slot_one_multiplier: Decimal,
    slot_two_label: String,
    slot_two_multiplier: Decimal,
}

impl FormulaTemplate {
    /// Builds a template from the configured bonus slots.
    pub fn from_slots(slots: &BonusSlots) -> Self {
        Self {
            slot_one_label: slots.slot_one.label.clone(),
            slot_one_multiplier: slots.slot_one.multiplier,
            slot_two_label: slots.slot_two.label.clone(),
            slot_two_multiplier: slots.slot_two.multiplier,
        }
    }

    /// Header text for a column, using the slot labels for the slot columns.
    pub fn header(&self, column: ReportColumn) -> &str {
        match column {
            BonusSlotOne => &self.slot_one_label,
            BonusSlotTwo => &self.slot_two_label,
            other => other.header(),
        }
    }

    /// The header row.
    pub fn headers(&self) -> Vec<String> {
        ReportColumn::ALL
            .iter()
            .map(|column| self.header(*column).to_string())
            .collect()
    }

    /// Total Pay for worksheet row `row`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    /// use payroll_engine::export::FormulaTemplate;
    ///
    /// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
    /// let template = FormulaTemplate::from_slots(&loader.config().closer().bonus_slots);
    ///
    /// assert_eq!(template.total_pay(2), "=E2+F2+G2+H2+I2+J2+K2*25+L2*50");
    /// ```
    pub fn total_pay(&self, row: usize) -> String {
        format!(
            "={}+{}+{}+{}+{}+{}+{}*{}+{}*{}",
            HourlyPay.cell(row),
            RegularDealsPay.cell(row),
            SaturdayDealsPay.cell(row),
            HoursBonus.cell(row),
            FirstDealBonus.cell(row),
            ManualBonus.cell(row),
            BonusSlotOne.cell(row),
            self.slot_one_multiplier.normalize(),
            BonusSlotTwo.cell(row),
            self.slot_two_multiplier.normalize()
        )
    }

    /// CPA for worksheet row `row`, guarded against a zero deal count.
    ///
    /// # Example
    ///
    /// ```
    /// # use payroll_engine::config::ConfigLoader;
    /// # use payroll_engine::export::FormulaTemplate;
    /// # let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
    /// # let template = FormulaTemplate::from_slots(&loader.config().closer().bonus_slots);
    /// assert_eq!(template.cpa(5), "=IF(B5>0,M5/B5,0)");
    /// ```
    pub fn cpa(&self, row: usize) -> String {
        format!(
            "=IF({}>0,{}/{},0)",
            DealCount.cell(row),
            TotalPay.cell(row),
            DealCount.cell(row)
        )
    }

    /// Sum of a column over the agent rows ending at `last_row`.
    pub fn column_sum(&self, column: ReportColumn, last_row: usize) -> String {
        format!(
            "=SUM({}:{})",
            column.cell(FIRST_DATA_ROW),
            column.cell(last_row)
        )
    }

    /// The summary row's aggregate CPA on worksheet row `summary_row`.
    pub fn summary_cpa(&self, summary_row: usize) -> String {
        self.cpa(summary_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BonusSlot;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn template(one: &str, two: &str) -> FormulaTemplate {
        FormulaTemplate::from_slots(&BonusSlots {
            slot_one: BonusSlot {
                label: format!("Bonus Count x{}", one),
                multiplier: dec(one),
            },
            slot_two: BonusSlot {
                label: format!("Bonus Count x{}", two),
                multiplier: dec(two),
            },
        })
    }

    #[test]
    fn test_total_pay_formula_uses_configured_multipliers() {
        assert_eq!(
            template("30", "60").total_pay(9),
            "=E9+F9+G9+H9+I9+J9+K9*30+L9*60"
        );
    }

    #[test]
    fn test_multiplier_trailing_zeros_are_dropped() {
        assert_eq!(
            template("25.00", "50.0").total_pay(2),
            "=E2+F2+G2+H2+I2+J2+K2*25+L2*50"
        );
    }

    #[test]
    fn test_summary_formulas() {
        let template = template("25", "50");
        assert_eq!(template.column_sum(DealCount, 4), "=SUM(B2:B4)");
        assert_eq!(template.column_sum(TotalPay, 4), "=SUM(M2:M4)");
        assert_eq!(template.summary_cpa(5), "=IF(B5>0,M5/B5,0)");
    }

    #[test]
    fn test_headers_use_slot_labels() {
        let headers = template("30", "60").headers();
        assert_eq!(headers.len(), 14);
        assert_eq!(headers[0], "Agent");
        assert_eq!(headers[10], "Bonus Count x30");
        assert_eq!(headers[11], "Bonus Count x60");
        assert_eq!(headers[13], "CPA");
    }
}
