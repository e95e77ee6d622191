//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] type and its associated
//! structures capturing everything a run produces: ordered payroll lines,
//! the aggregate summary, names that failed to reconcile, and an audit trace
//! of rule decisions and data-quality warnings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollLine, Role, WeekendPolicy};

/// Where an unmatched name was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// The role timesheet.
    Timesheet,
    /// The deal tracker's closer or enroller column.
    DealTracker,
}

/// A name that did not clear the matching threshold against the other source.
///
/// Timesheet names in this list still get a payroll line under their own
/// spelling. Deal tracker names in this list carry deals that reach no
/// payroll line at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedName {
    /// The role roster the name belongs to.
    pub role: Role,
    /// The source the name came from.
    pub source: NameSource,
    /// The normalized name.
    pub name: String,
    /// The closest candidate in the other source, if any existed.
    pub best_candidate: Option<String>,
    /// Similarity score (0-100) of `best_candidate`.
    pub best_score: u8,
}

/// A single step in the audit trace recording a rule decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The agent the rule was applied to.
    pub agent: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A data-quality warning raised while preparing the inputs.
///
/// Warnings never abort a run; the affected value falls back to a safe
/// default and the warning records what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning (e.g. `MALFORMED_DURATION`).
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of rule steps.
    pub steps: Vec<AuditStep>,
    /// Any data-quality warnings.
    pub warnings: Vec<AuditWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

/// Aggregate figures across every line of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of total pay across all lines.
    pub total_pay: Decimal,
    /// Sum of deal counts across all lines.
    pub total_deals: u32,
    /// `total_pay / total_deals`, or zero when there are no deals.
    pub aggregate_cpa: Decimal,
}

impl ReportSummary {
    /// Computes the summary for a set of lines.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::ReportSummary;
    ///
    /// let summary = ReportSummary::from_lines(&[]);
    /// assert_eq!(summary.total_deals, 0);
    /// assert!(summary.aggregate_cpa.is_zero());
    /// ```
    pub fn from_lines(lines: &[PayrollLine]) -> Self {
        let total_pay: Decimal = lines.iter().map(|line| line.total_pay).sum();
        let total_deals: u32 = lines.iter().map(|line| line.deal_count).sum();
        let aggregate_cpa = if total_deals > 0 {
            total_pay / Decimal::from(total_deals)
        } else {
            Decimal::ZERO
        };

        Self {
            total_pay,
            total_deals,
            aggregate_cpa,
        }
    }
}

/// The complete result of a weekly payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The weekend policy applied to weekend counts and pay.
    pub weekend_policy: WeekendPolicy,
    /// Closer lines (alphabetical) followed by enroller lines (alphabetical).
    pub lines: Vec<PayrollLine>,
    /// Aggregate figures across all lines.
    pub summary: ReportSummary,
    /// Names that failed to reconcile, for operator review.
    pub unmatched_names: Vec<UnmatchedName>,
    /// Rule decisions and data-quality warnings.
    pub audit_trace: AuditTrace,
}

impl PayrollReport {
    /// Returns the lines for one role, in report order.
    pub fn lines_for(&self, role: Role) -> impl Iterator<Item = &PayrollLine> {
        self.lines.iter().filter(move |line| line.role == role)
    }

    /// Returns the line for an agent in a role, if present.
    pub fn line(&self, agent: &str, role: Role) -> Option<&PayrollLine> {
        self.lines
            .iter()
            .find(|line| line.role == role && line.agent == agent)
    }
}
