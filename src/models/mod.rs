//! Core data models for the Weekly Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod agent;
mod deal;
mod payroll_line;
mod report;
mod timesheet;
mod weekend;

pub use agent::Role;
pub use deal::{CloserDealStats, DealRecord, RawDealRow, ResolvedDeal};
pub use payroll_line::{ManualAdjustments, PayrollLine};
pub use report::{
    AuditStep, AuditTrace, AuditWarning, NameSource, PayrollReport, ReportSummary, UnmatchedName,
};
pub use timesheet::{RawTimesheetRow, TimesheetEntry};
pub use weekend::{WeekendPolicy, WeekendSetting};
