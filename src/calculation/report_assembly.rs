//! Report assembly.

use std::cmp::Ordering;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{AuditTrace, PayrollLine, PayrollReport, ReportSummary, UnmatchedName, WeekendPolicy};

/// Orders two payroll lines for the report.
///
/// Closers come before enrollers. Within a role, agents are ordered by
/// case-insensitive name, with the exact name breaking ties so the ordering
/// is total.
pub fn report_order(a: &PayrollLine, b: &PayrollLine) -> Ordering {
    a.role
        .cmp(&b.role)
        .then_with(|| a.agent.to_lowercase().cmp(&b.agent.to_lowercase()))
        .then_with(|| a.agent.cmp(&b.agent))
}

/// Builds the final report from computed lines.
///
/// Lines are sorted with [`report_order`] and the summary is computed over
/// all of them. Values are kept at full precision.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::assemble_report;
/// use payroll_engine::models::{AuditTrace, WeekendPolicy};
/// use chrono::Weekday;
///
/// let report = assemble_report(
///     vec![],
///     vec![],
///     WeekendPolicy::Weekday { weekday: Weekday::Sat },
///     AuditTrace::default(),
/// );
/// assert!(report.lines.is_empty());
/// assert!(report.summary.aggregate_cpa.is_zero());
/// ```
pub fn assemble_report(
    mut lines: Vec<PayrollLine>,
    unmatched_names: Vec<UnmatchedName>,
    weekend_policy: WeekendPolicy,
    audit_trace: AuditTrace,
) -> PayrollReport {
    lines.sort_by(report_order);
    let summary = ReportSummary::from_lines(&lines);

    PayrollReport {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        weekend_policy,
        lines,
        summary,
        unmatched_names,
        audit_trace,
    }
}
