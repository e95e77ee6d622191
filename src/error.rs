//! Error types for the Weekly Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the structural failures that abort a payroll run. Data-quality issues
//! (bad durations, bad dates, unmatched names) are not errors; they are
//! recovered locally and reported as warnings on the [`crate::models::PayrollReport`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one of the three required payroll inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// The deal-tracking export (`DATE`, `CLOSER`, `ENROLLER`).
    DealTracker,
    /// The closer timesheet (`Rep`, `Man Hours`).
    CloserTimesheet,
    /// The enroller timesheet (`Rep`, `Man Hours`).
    EnrollerTimesheet,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::DealTracker => write!(f, "deal tracker"),
            InputSource::CloserTimesheet => write!(f, "closer timesheet"),
            InputSource::EnrollerTimesheet => write!(f, "enroller timesheet"),
        }
    }
}

/// The main error type for the Weekly Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{InputSource, PayrollError};
///
/// let error = PayrollError::MissingInput {
///     input: InputSource::CloserTimesheet,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Missing required input: closer timesheet. Please provide all three CSV files to proceed"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// One of the three required inputs was not supplied.
    #[error("Missing required input: {input}. Please provide all three CSV files to proceed")]
    MissingInput {
        /// The input that was absent.
        input: InputSource,
    },

    /// An input was supplied but lacks a required column.
    #[error("The {input} is missing required column '{column}'")]
    MissingColumn {
        /// The input that lacked the column.
        input: InputSource,
        /// The required column name.
        column: String,
    },

    /// An input could not be read as delimited text.
    #[error("Failed to read the {input}: {message}")]
    InputParseError {
        /// The input that failed to parse.
        input: InputSource,
        /// A description of the parse error.
        message: String,
    },

    /// The report could not be written to the export sink.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PayrollError::ConfigNotFound {
            path: "/missing/closer.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/closer.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_missing_column_displays_source_and_column() {
        let error = PayrollError::MissingColumn {
            input: InputSource::DealTracker,
            column: "CLOSER".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "The deal tracker is missing required column 'CLOSER'"
        );
    }

    #[test]
    fn test_input_parse_error_displays_source() {
        let error = PayrollError::InputParseError {
            input: InputSource::EnrollerTimesheet,
            message: "invalid UTF-8".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read the enroller timesheet: invalid UTF-8"
        );
    }

    #[test]
    fn test_input_source_serializes_snake_case() {
        let json = serde_json::to_string(&InputSource::CloserTimesheet).unwrap();
        assert_eq!(json, "\"closer_timesheet\"");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_input() -> PayrollResult<()> {
            Err(PayrollError::MissingInput {
                input: InputSource::DealTracker,
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_missing_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
