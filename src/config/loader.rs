//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use chrono::Weekday;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::{
    CloserRules, EnrollerRules, MatchingConfig, MatchingFile, PayrollConfig, PlanMetadata,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/weekly_payroll/
/// ├── plan.yaml      # Plan metadata
/// ├── closer.yaml    # Closer rate tiers, deal rates and bonuses
/// ├── enroller.yaml  # Enroller hourly and submission rates
/// └── matching.yaml  # Name matching threshold and weekend policy
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/weekly_payroll").unwrap();
/// println!("Loaded plan: {}", loader.plan().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The weekend weekday is not a weekday name
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PlanMetadata>(&path.join("plan.yaml"))?;
        let closer = Self::load_yaml::<CloserRules>(&path.join("closer.yaml"))?;
        let enroller = Self::load_yaml::<EnrollerRules>(&path.join("enroller.yaml"))?;

        let matching_path = path.join("matching.yaml");
        let matching_file = Self::load_yaml::<MatchingFile>(&matching_path)?;
        let matching = Self::build_matching(matching_file, &matching_path)?;

        Ok(Self {
            config: PayrollConfig::new(metadata, closer, enroller, matching),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn build_matching(file: MatchingFile, path: &Path) -> PayrollResult<MatchingConfig> {
        let weekend_weekday = file.weekend.weekday.trim().parse::<Weekday>().map_err(|_| {
            PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("unknown weekday '{}'", file.weekend.weekday),
            }
        })?;

        if file.threshold > 100 {
            return Err(PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("threshold {} is outside 0-100", file.threshold),
            });
        }

        Ok(MatchingConfig {
            threshold: file.threshold,
            weekend_weekday,
            default_weekend: file.weekend.default_setting,
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the plan metadata.
    pub fn plan(&self) -> &PlanMetadata {
        self.config.plan()
    }
}
