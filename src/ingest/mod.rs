//! Input loading for a payroll run.
//!
//! A run needs three delimited text inputs: the deal tracker export, the
//! closer timesheet and the enroller timesheet. Reading them is the only
//! stage that can abort a run; everything after works on the rows as read.

mod reader;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InputSource, PayrollError, PayrollResult};
use crate::models::{RawDealRow, RawTimesheetRow};

pub use reader::{
    DEAL_CLOSER_COLUMN, DEAL_DATE_COLUMN, DEAL_ENROLLER_COLUMN, TIMESHEET_HOURS_COLUMN,
    TIMESHEET_REP_COLUMN, read_deal_tracker, read_timesheet,
};

/// File locations of the three inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// The deal tracker export.
    pub deals: PathBuf,
    /// The closer timesheet.
    pub closers: PathBuf,
    /// The enroller timesheet.
    pub enrollers: PathBuf,
}

/// The raw rows of all three inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInputs {
    /// Deal tracker rows.
    pub deals: Vec<RawDealRow>,
    /// Closer timesheet rows.
    pub closer_timesheet: Vec<RawTimesheetRow>,
    /// Enroller timesheet rows.
    pub enroller_timesheet: Vec<RawTimesheetRow>,
}

impl PayrollInputs {
    /// Parses the three inputs from delimited text.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::ingest::PayrollInputs;
    ///
    /// let inputs = PayrollInputs::from_csv(
    ///     "DATE,CLOSER,ENROLLER\n2025-08-02 10:00:00,john smith,ada jones\n",
    ///     "Rep,Man Hours\nJohn Smith,8:00:00\n",
    ///     "Rep,Man Hours\nAda Jones,6:30:00\n",
    /// )
    /// .unwrap();
    /// assert_eq!(inputs.deals.len(), 1);
    /// assert_eq!(inputs.enroller_timesheet[0].man_hours, "6:30:00");
    /// ```
    pub fn from_csv(deals: &str, closers: &str, enrollers: &str) -> PayrollResult<Self> {
        Ok(Self {
            deals: read_deal_tracker(deals)?,
            closer_timesheet: read_timesheet(closers, InputSource::CloserTimesheet)?,
            enroller_timesheet: read_timesheet(enrollers, InputSource::EnrollerTimesheet)?,
        })
    }

    /// Reads and parses the three inputs from disk.
    ///
    /// A file that does not exist is a [`PayrollError::MissingInput`].
    pub fn load(paths: &InputPaths) -> PayrollResult<Self> {
        let deals = read_input(&paths.deals, InputSource::DealTracker)?;
        let closers = read_input(&paths.closers, InputSource::CloserTimesheet)?;
        let enrollers = read_input(&paths.enrollers, InputSource::EnrollerTimesheet)?;
        Self::from_csv(&deals, &closers, &enrollers)
    }
}

fn read_input(path: &Path, input: InputSource) -> PayrollResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PayrollError::MissingInput { input },
        _ => PayrollError::InputParseError {
            input,
            message: format!("{}: {}", path.display(), e),
        },
    })
}
