//! Request types for the Weekly Payroll Engine API.
//!
//! This module defines the JSON request structure shared by the `/payroll`
//! and `/payroll/export` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::RunOptions;
use crate::error::{InputSource, PayrollError, PayrollResult};
use crate::ingest::PayrollInputs;
use crate::models::WeekendSetting;

/// Request body for the payroll endpoints.
///
/// The three inputs are the raw delimited text of each file. They are
/// optional at the JSON level so that an absent input is reported as a
/// missing input naming the file rather than as a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The deal tracker export.
    #[serde(default)]
    pub deal_tracker_csv: Option<String>,
    /// The closer timesheet.
    #[serde(default)]
    pub closer_timesheet_csv: Option<String>,
    /// The enroller timesheet.
    #[serde(default)]
    pub enroller_timesheet_csv: Option<String>,
    /// Weekend setting override; the configured default applies when absent.
    #[serde(default)]
    pub weekend: Option<WeekendSetting>,
    /// Reference date for resolving the default weekend date; today when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl PayrollRequest {
    /// Parses the three inputs.
    ///
    /// The first absent input, in deal tracker, closer, enroller order, is
    /// reported as [`PayrollError::MissingInput`].
    pub fn inputs(&self) -> PayrollResult<PayrollInputs> {
        let deals = required(&self.deal_tracker_csv, InputSource::DealTracker)?;
        let closers = required(&self.closer_timesheet_csv, InputSource::CloserTimesheet)?;
        let enrollers = required(&self.enroller_timesheet_csv, InputSource::EnrollerTimesheet)?;
        PayrollInputs::from_csv(deals, closers, enrollers)
    }

    /// Builds the run options for this request.
    pub fn options(&self) -> RunOptions {
        let mut options = match self.as_of {
            Some(as_of) => RunOptions::new(as_of),
            None => RunOptions::default(),
        };
        options.weekend = self.weekend;
        options
    }
}

fn required(value: &Option<String>, input: InputSource) -> PayrollResult<&str> {
    value
        .as_deref()
        .ok_or(PayrollError::MissingInput { input })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "deal_tracker_csv": "DATE,CLOSER,ENROLLER\n",
            "closer_timesheet_csv": "Rep,Man Hours\n",
            "enroller_timesheet_csv": "Rep,Man Hours\n",
            "weekend": {"policy": "fixed_date", "date": "2025-08-02"},
            "as_of": "2025-08-06"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        let options = request.options();

        assert_eq!(
            options.weekend,
            Some(WeekendSetting::FixedDate {
                date: NaiveDate::from_ymd_opt(2025, 8, 2)
            })
        );
        assert_eq!(options.as_of, NaiveDate::from_ymd_opt(2025, 8, 6).unwrap());
        assert!(request.inputs().is_ok());
    }

    #[test]
    fn test_absent_input_is_missing_input() {
        let request = PayrollRequest {
            deal_tracker_csv: Some("DATE,CLOSER,ENROLLER\n".to_string()),
            enroller_timesheet_csv: Some("Rep,Man Hours\n".to_string()),
            ..Default::default()
        };

        let err = request.inputs().unwrap_err();
        assert!(matches!(
            err,
            PayrollError::MissingInput {
                input: InputSource::CloserTimesheet
            }
        ));
    }

    #[test]
    fn test_weekend_defaults_to_configured_setting() {
        let request: PayrollRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.options().weekend, None);
    }
}
