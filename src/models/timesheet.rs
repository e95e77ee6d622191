//! Timesheet models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One data row of a role timesheet exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimesheetRow {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    /// The `Rep` cell.
    pub rep: String,
    /// The `Man Hours` cell, expected as `H:M:S`.
    pub man_hours: String,
}

/// A timesheet row with a normalized name and hours converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// 1-based data row number.
    pub row: usize,
    /// Normalized agent name.
    pub name: String,
    /// The duration string as supplied.
    pub raw_duration: String,
    /// Whole hours worked, rounded up. Zero when the duration was malformed.
    pub hours: Decimal,
    /// Whether `raw_duration` parsed as `H:M:S`.
    pub duration_valid: bool,
}
