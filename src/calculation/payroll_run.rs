//! The weekly payroll run.
//!
//! [`calculate_weekly_payroll`] drives every stage in order over a complete
//! set of inputs:
//!
//! 1. Normalize every name and parse durations and deal dates. Malformed
//!    values fall back to a default and are recorded as warnings.
//! 2. Resolve each role's roster between the deal tracker and its timesheet.
//! 3. Resolve the weekend policy and aggregate deals per identity.
//! 4. Evaluate the pay rules for every agent with a timesheet entry.
//! 5. Assemble the ordered report.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PayrollConfig;
use crate::error::PayrollResult;
use crate::ingest::PayrollInputs;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DealRecord, NameSource, PayrollLine, PayrollReport,
    RawTimesheetRow, ResolvedDeal, Role, TimesheetEntry, UnmatchedName, WeekendSetting,
};

use super::{
    RosterResolution, aggregate_closer_deals, aggregate_enroller_submissions, assemble_report,
    calculate_closer_pay, calculate_enroller_pay, distinct_names, normalize_name,
    parse_deal_timestamp, parse_duration_hours, resolve_roster, resolve_weekend_policy,
};

/// Warning code for a `Man Hours` value that is not `H:M:S`.
pub const WARNING_MALFORMED_DURATION: &str = "MALFORMED_DURATION";
/// Warning code for a deal `DATE` that matched no accepted layout.
pub const WARNING_UNPARSEABLE_DATE: &str = "UNPARSEABLE_DATE";
/// Warning code for a name with no match in the other source.
pub const WARNING_UNMATCHED_NAME: &str = "UNMATCHED_NAME";
/// Warning code for a timesheet row with no usable name.
pub const WARNING_EMPTY_NAME: &str = "EMPTY_NAME";
/// More than one distinct timesheet spelling resolved to one agent.
pub const WARNING_MERGED_NAMES: &str = "MERGED_NAMES";

/// Per-run options that are not part of the payroll configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Weekend setting for this run; the configured default applies when `None`.
    pub weekend: Option<WeekendSetting>,
    /// Reference date for resolving a default weekend date with no weekend
    /// deals in the data.
    pub as_of: NaiveDate,
}

impl RunOptions {
    /// Options with the configured weekend setting and the given reference date.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            weekend: None,
            as_of,
        }
    }

    /// Overrides the weekend setting.
    pub fn with_weekend(mut self, weekend: WeekendSetting) -> Self {
        self.weekend = Some(weekend);
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Computes the weekly payroll report.
///
/// Agents are paid only in a role for which they have a timesheet entry.
/// Deals whose closer or enroller resolves to nobody on that role's timesheet
/// reach no line; their names are listed in
/// [`PayrollReport::unmatched_names`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{RunOptions, calculate_weekly_payroll};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::ingest::PayrollInputs;
/// use payroll_engine::models::Role;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/weekly_payroll").unwrap();
/// let inputs = PayrollInputs::from_csv(
///     "DATE,CLOSER,ENROLLER\n2025-07-28 09:00:00,john smith,ada jones\n",
///     "Rep,Man Hours\nJohn  Smith,10:00:00\n",
///     "Rep,Man Hours\nAda Jones,4:00:00\n",
/// )
/// .unwrap();
/// let options = RunOptions::new(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap());
///
/// let report = calculate_weekly_payroll(&inputs, loader.config(), &options).unwrap();
///
/// let closer = report.line("John Smith", Role::Closer).unwrap();
/// // 10h x $13 + 1 x $35 + 1 first deal x $25
/// assert_eq!(closer.total_pay, Decimal::from(190));
/// ```
pub fn calculate_weekly_payroll(
    inputs: &PayrollInputs,
    config: &PayrollConfig,
    options: &RunOptions,
) -> PayrollResult<PayrollReport> {
    let start_time = Instant::now();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut steps: Vec<AuditStep> = Vec::new();
    let threshold = config.matching().threshold;

    let deals = prepare_deals(inputs, &mut warnings);
    let closer_entries = prepare_timesheet(&inputs.closer_timesheet, Role::Closer, &mut warnings);
    let enroller_entries =
        prepare_timesheet(&inputs.enroller_timesheet, Role::Enroller, &mut warnings);
    debug!(
        deals = deals.len(),
        closer_rows = closer_entries.len(),
        enroller_rows = enroller_entries.len(),
        "Inputs normalized"
    );

    let closer_roster = resolve_roster(
        Role::Closer,
        &distinct_names(deals.iter().map(|d| d.closer.as_str())),
        &distinct_names(closer_entries.iter().map(|e| e.name.as_str())),
        threshold,
    );
    let enroller_roster = resolve_roster(
        Role::Enroller,
        &distinct_names(deals.iter().map(|d| d.enroller.as_str())),
        &distinct_names(enroller_entries.iter().map(|e| e.name.as_str())),
        threshold,
    );

    let mut unmatched_names: Vec<UnmatchedName> = Vec::new();
    for roster in [&closer_roster, &enroller_roster] {
        for name in &roster.unmatched {
            record_warning(&mut warnings, unmatched_warning(name));
        }
        unmatched_names.extend(roster.unmatched.iter().cloned());
    }
    debug!(
        unmatched = unmatched_names.len(),
        "Rosters resolved"
    );

    let resolved: Vec<ResolvedDeal> = deals
        .iter()
        .map(|deal| ResolvedDeal {
            row: deal.row,
            closer: closer_roster.resolve_deal_name(&deal.closer).to_string(),
            enroller: enroller_roster.resolve_deal_name(&deal.enroller).to_string(),
            timestamp: deal.timestamp,
        })
        .collect();

    let setting = options
        .weekend
        .unwrap_or(config.matching().default_weekend);
    let weekend_policy = resolve_weekend_policy(
        setting,
        config.matching().weekend_weekday,
        deals.iter().filter_map(DealRecord::date),
        options.as_of,
    );
    debug!(weekend_policy = %weekend_policy, "Weekend policy resolved");

    let closer_stats = aggregate_closer_deals(&resolved, &weekend_policy);
    let submissions = aggregate_enroller_submissions(&resolved);

    merged_name_warnings(Role::Closer, &closer_entries, &closer_roster, &mut warnings);
    merged_name_warnings(Role::Enroller, &enroller_entries, &enroller_roster, &mut warnings);

    let mut lines: Vec<PayrollLine> = Vec::new();
    let mut step_number: u32 = 1;

    for (agent, hours) in hours_by_identity(&closer_entries, &closer_roster) {
        let stats = closer_stats.get(&agent).copied().unwrap_or_default();
        let result = calculate_closer_pay(&agent, hours, &stats, config.closer(), step_number);
        step_number += result.audit_steps.len() as u32;
        steps.extend(result.audit_steps);
        lines.push(result.line);
    }

    for (agent, hours) in hours_by_identity(&enroller_entries, &enroller_roster) {
        let submitted = submissions.get(&agent).copied().unwrap_or(0);
        let result = calculate_enroller_pay(
            &agent,
            hours,
            submitted,
            config.enroller(),
            &config.closer().bonus_slots,
            step_number,
        );
        step_number += 1;
        steps.push(result.audit_step);
        lines.push(result.line);
    }

    let audit_trace = AuditTrace {
        steps,
        warnings,
        duration_us: 0,
    };
    let mut report = assemble_report(lines, unmatched_names, weekend_policy, audit_trace);
    report.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        run_id = %report.run_id,
        lines = report.lines.len(),
        total_pay = %report.summary.total_pay,
        warnings = report.audit_trace.warnings.len(),
        duration_us = report.audit_trace.duration_us,
        "Payroll run completed"
    );

    Ok(report)
}

fn record_warning(warnings: &mut Vec<AuditWarning>, warning: AuditWarning) {
    warn!(code = %warning.code, "{}", warning.message);
    warnings.push(warning);
}

fn prepare_deals(inputs: &PayrollInputs, warnings: &mut Vec<AuditWarning>) -> Vec<DealRecord> {
    inputs
        .deals
        .iter()
        .map(|raw| {
            let timestamp = parse_deal_timestamp(&raw.date);
            if timestamp.is_none() {
                record_warning(
                    warnings,
                    AuditWarning::new(
                        WARNING_UNPARSEABLE_DATE,
                        format!(
                            "Deal tracker row {}: DATE '{}' could not be parsed; the deal counts toward totals but not weekend or first deal counts",
                            raw.row, raw.date
                        ),
                        "medium",
                    ),
                );
            }
            DealRecord {
                row: raw.row,
                closer: normalize_name(&raw.closer),
                enroller: normalize_name(&raw.enroller),
                timestamp,
            }
        })
        .collect()
}

fn prepare_timesheet(
    rows: &[RawTimesheetRow],
    role: Role,
    warnings: &mut Vec<AuditWarning>,
) -> Vec<TimesheetEntry> {
    let mut entries = Vec::with_capacity(rows.len());

    for raw in rows {
        let name = normalize_name(&raw.rep);
        if name.is_empty() {
            record_warning(
                warnings,
                AuditWarning::new(
                    WARNING_EMPTY_NAME,
                    format!("{} timesheet row {}: no Rep name; row skipped", role, raw.row),
                    "medium",
                ),
            );
            continue;
        }

        let hours = parse_duration_hours(&raw.man_hours);
        if hours.is_none() {
            record_warning(
                warnings,
                AuditWarning::new(
                    WARNING_MALFORMED_DURATION,
                    format!(
                        "{} timesheet row {} ({}): Man Hours '{}' is not H:M:S; counted as 0 hours",
                        role, raw.row, name, raw.man_hours
                    ),
                    "medium",
                ),
            );
        }

        entries.push(TimesheetEntry {
            row: raw.row,
            name,
            raw_duration: raw.man_hours.clone(),
            hours: hours.map(Decimal::from).unwrap_or(Decimal::ZERO),
            duration_valid: hours.is_some(),
        });
    }

    entries
}

fn unmatched_warning(name: &UnmatchedName) -> AuditWarning {
    let source = match name.source {
        NameSource::Timesheet => "timesheet",
        NameSource::DealTracker => "deal tracker",
    };
    let closest = match &name.best_candidate {
        Some(candidate) => format!("closest was '{}' at {}", candidate, name.best_score),
        None => "no candidates".to_string(),
    };
    let (consequence, severity) = match name.source {
        NameSource::Timesheet => ("paid under its own spelling", "medium"),
        NameSource::DealTracker => ("its deals reach no payroll line", "high"),
    };

    AuditWarning::new(
        WARNING_UNMATCHED_NAME,
        format!(
            "{} name '{}' in the {} has no match ({}); {}",
            name.role, name.name, source, closest, consequence
        ),
        severity,
    )
}

/// Sums whole hours per identity over the timesheet rows of one role.
fn hours_by_identity(
    entries: &[TimesheetEntry],
    roster: &RosterResolution,
) -> BTreeMap<String, Decimal> {
    let mut hours: BTreeMap<String, Decimal> = BTreeMap::new();
    for entry in entries {
        let identity = roster.resolve_timesheet_name(&entry.name).to_string();
        *hours.entry(identity).or_default() += entry.hours;
    }
    hours
}

/// Warns once per identity that absorbed several distinct timesheet spellings.
///
/// Their hours are summed into one line, so a spurious fuzzy merge would
/// otherwise pass unnoticed.
fn merged_name_warnings(
    role: Role,
    entries: &[TimesheetEntry],
    roster: &RosterResolution,
    warnings: &mut Vec<AuditWarning>,
) {
    let mut spellings: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in entries {
        let names = spellings
            .entry(roster.resolve_timesheet_name(&entry.name))
            .or_default();
        if !names.contains(&entry.name.as_str()) {
            names.push(entry.name.as_str());
        }
    }

    for (identity, names) in spellings.into_iter().filter(|(_, names)| names.len() > 1) {
        record_warning(
            warnings,
            AuditWarning::new(
                WARNING_MERGED_NAMES,
                format!(
                    "{} timesheet names {} all resolve to '{}'; their hours are summed",
                    role,
                    names
                        .iter()
                        .map(|name| format!("'{}'", name))
                        .collect::<Vec<_>>()
                        .join(", "),
                    identity
                ),
                "low",
            ),
        );
    }
}
