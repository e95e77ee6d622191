//! Export column layout.

use serde::{Deserialize, Serialize};

/// A column of the payroll export, in worksheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReportColumn {
    /// Agent name.
    Agent,
    /// Closed or submitted deals.
    DealCount,
    /// Whole hours worked.
    ManHours,
    /// Applicable hourly rate.
    HourlyRate,
    /// Hourly rate times hours.
    HourlyPay,
    /// Regular deal pay (submission pay for enrollers).
    RegularDealsPay,
    /// Weekend deal pay.
    SaturdayDealsPay,
    /// Flat hours bonus.
    HoursBonus,
    /// First deal of the day bonus.
    FirstDealBonus,
    /// Manually entered bonus.
    ManualBonus,
    /// Manually entered count for the first bonus slot.
    BonusSlotOne,
    /// Manually entered count for the second bonus slot.
    BonusSlotTwo,
    /// Sum of every pay component.
    TotalPay,
    /// Cost per acquisition.
    Cpa,
}

impl ReportColumn {
    /// Every column in worksheet order.
    pub const ALL: [ReportColumn; 14] = [
        ReportColumn::Agent,
        ReportColumn::DealCount,
        ReportColumn::ManHours,
        ReportColumn::HourlyRate,
        ReportColumn::HourlyPay,
        ReportColumn::RegularDealsPay,
        ReportColumn::SaturdayDealsPay,
        ReportColumn::HoursBonus,
        ReportColumn::FirstDealBonus,
        ReportColumn::ManualBonus,
        ReportColumn::BonusSlotOne,
        ReportColumn::BonusSlotTwo,
        ReportColumn::TotalPay,
        ReportColumn::Cpa,
    ];

    /// Zero-based position of the column.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Spreadsheet column letter.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::export::ReportColumn;
    ///
    /// assert_eq!(ReportColumn::Agent.letter(), 'A');
    /// assert_eq!(ReportColumn::TotalPay.letter(), 'M');
    /// assert_eq!(ReportColumn::Cpa.letter(), 'N');
    /// ```
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Default header text.
    ///
    /// The bonus slot headers are normally taken from the configured slot
    /// labels instead.
    pub fn header(self) -> &'static str {
        match self {
            ReportColumn::Agent => "Agent",
            ReportColumn::DealCount => "Deal Count",
            ReportColumn::ManHours => "Man Hours",
            ReportColumn::HourlyRate => "Hourly Rate",
            ReportColumn::HourlyPay => "Hourly Pay",
            ReportColumn::RegularDealsPay => "Regular Deals Pay",
            ReportColumn::SaturdayDealsPay => "Saturday Deals Pay",
            ReportColumn::HoursBonus => "Hours Bonus",
            ReportColumn::FirstDealBonus => "First Deal Bonus",
            ReportColumn::ManualBonus => "Manual Bonus",
            ReportColumn::BonusSlotOne => "Bonus Count x25",
            ReportColumn::BonusSlotTwo => "Bonus Count x50",
            ReportColumn::TotalPay => "Total Pay",
            ReportColumn::Cpa => "CPA",
        }
    }

    /// Returns the spreadsheet reference of this column in a worksheet row.
    pub fn cell(self, row: usize) -> String {
        format!("{}{}", self.letter(), row)
    }
}
