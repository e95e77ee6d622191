//! Delimited text readers for the deal tracker and the timesheets.

use csv::{ReaderBuilder, StringRecord};

use crate::error::{InputSource, PayrollError, PayrollResult};
use crate::models::{RawDealRow, RawTimesheetRow};

/// Deal tracker column holding the deal timestamp.
pub const DEAL_DATE_COLUMN: &str = "DATE";
/// Deal tracker column holding the closer name.
pub const DEAL_CLOSER_COLUMN: &str = "CLOSER";
/// Deal tracker column holding the enroller name.
pub const DEAL_ENROLLER_COLUMN: &str = "ENROLLER";
/// Timesheet column holding the agent name.
pub const TIMESHEET_REP_COLUMN: &str = "Rep";
/// Timesheet column holding the `H:M:S` duration.
pub const TIMESHEET_HOURS_COLUMN: &str = "Man Hours";

/// Reduces a header to its comparison form: trimmed, lower-cased, with runs
/// of internal whitespace collapsed to one space.
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A parsed table with the positions of its required columns.
struct Table {
    columns: Vec<usize>,
    records: Vec<StringRecord>,
}

impl Table {
    /// Returns a required field of a record; short rows read as empty.
    fn field<'r>(&self, record: &'r StringRecord, column: usize) -> &'r str {
        record.get(self.columns[column]).unwrap_or("")
    }
}

fn read_table(text: &str, input: InputSource, required: &[&str]) -> PayrollResult<Table> {
    if text.trim().is_empty() {
        return Err(PayrollError::MissingInput { input });
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PayrollError::InputParseError {
            input,
            message: e.to_string(),
        })?
        .iter()
        .map(normalize_header)
        .collect();

    let columns = required
        .iter()
        .map(|column| {
            let wanted = normalize_header(column);
            headers
                .iter()
                .position(|header| *header == wanted)
                .ok_or_else(|| PayrollError::MissingColumn {
                    input,
                    column: column.to_string(),
                })
        })
        .collect::<PayrollResult<Vec<usize>>>()?;

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PayrollError::InputParseError {
            input,
            message: e.to_string(),
        })?;

    Ok(Table { columns, records })
}

/// Reads the deal tracker export.
///
/// Requires the `DATE`, `CLOSER` and `ENROLLER` columns; any other columns
/// are ignored. Rows are numbered from 1, not counting the header.
///
/// # Example
///
/// ```
/// use payroll_engine::ingest::read_deal_tracker;
///
/// let rows = read_deal_tracker("Date,Closer,Enroller,Plan\n2025-08-02,john smith,,Gold\n").unwrap();
/// assert_eq!(rows[0].row, 1);
/// assert_eq!(rows[0].closer, "john smith");
/// assert_eq!(rows[0].enroller, "");
/// ```
pub fn read_deal_tracker(text: &str) -> PayrollResult<Vec<RawDealRow>> {
    let table = read_table(
        text,
        InputSource::DealTracker,
        &[DEAL_DATE_COLUMN, DEAL_CLOSER_COLUMN, DEAL_ENROLLER_COLUMN],
    )?;

    Ok(table
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| RawDealRow {
            row: index + 1,
            date: table.field(record, 0).to_string(),
            closer: table.field(record, 1).to_string(),
            enroller: table.field(record, 2).to_string(),
        })
        .collect())
}

/// Reads a role timesheet with `Rep` and `Man Hours` columns.
///
/// `input` names the timesheet in error messages.
///
/// # Example
///
/// ```
/// use payroll_engine::error::InputSource;
/// use payroll_engine::ingest::read_timesheet;
///
/// let rows = read_timesheet("Rep,Man Hours\nJohn  Smith,45:00:00\n", InputSource::CloserTimesheet).unwrap();
/// assert_eq!(rows[0].rep, "John  Smith");
/// assert_eq!(rows[0].man_hours, "45:00:00");
/// ```
pub fn read_timesheet(text: &str, input: InputSource) -> PayrollResult<Vec<RawTimesheetRow>> {
    let table = read_table(text, input, &[TIMESHEET_REP_COLUMN, TIMESHEET_HOURS_COLUMN])?;

    Ok(table
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| RawTimesheetRow {
            row: index + 1,
            rep: table.field(record, 0).to_string(),
            man_hours: table.field(record, 1).to_string(),
        })
        .collect())
}
