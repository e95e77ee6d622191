//! Weekly Payroll Engine for sales closers and enrollers
//!
//! This crate reconciles a deal tracker export with the closer and enroller
//! timesheets, matches agent names across the sources, and calculates each
//! agent's weekly pay under the closer and enroller pay plans.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
