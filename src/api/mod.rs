//! HTTP API module for the Weekly Payroll Engine.
//!
//! This module provides the REST API endpoints for running the weekly payroll
//! over uploaded deal tracker and timesheet files.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
