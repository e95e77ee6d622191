//! Configuration loading and management for the Weekly Payroll Engine.
//!
//! This module provides functionality to load pay plan configurations from
//! YAML files: closer rate tiers and bonuses, enroller rates, and the name
//! matching and weekend settings.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/weekly_payroll").unwrap();
//! println!("Loaded plan: {}", config.plan().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BonusSlot, BonusSlots, CloserRules, DealRateTier, EnrollerRules, HoursBonusTier,
    MatchingConfig, PayrollConfig, PlanMetadata,
};
