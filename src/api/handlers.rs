//! HTTP request handlers for the Weekly Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_weekly_payroll;
use crate::export::{FormulaTemplate, write_csv};
use crate::models::PayrollReport;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/payroll/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /payroll endpoint.
///
/// Accepts the three inputs and returns the payroll report as JSON.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    match run_payroll(&state, payload, correlation_id) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(report),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for POST /payroll/export endpoint.
///
/// Accepts the three inputs and returns the spreadsheet export as CSV.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export request");

    let report = match run_payroll(&state, payload, correlation_id) {
        Ok(report) => report,
        Err(error) => return error.into_response(),
    };

    let template = FormulaTemplate::from_slots(&state.config().config().closer().bonus_slots);
    let mut body = Vec::new();
    if let Err(err) = write_csv(&report, &template, &mut body) {
        warn!(correlation_id = %correlation_id, error = %err, "Export failed");
        return json_error(err.into());
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"payroll.csv\"",
            ),
        ],
        body,
    )
        .into_response()
}

/// Parses the request and performs the payroll run.
fn run_payroll(
    state: &AppState,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<PayrollReport, Response> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response());
        }
    };

    let start_time = Instant::now();
    let result = request.inputs().and_then(|inputs| {
        calculate_weekly_payroll(&inputs, state.config().config(), &request.options())
    });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                lines = report.lines.len(),
                unmatched = report.unmatched_names.len(),
                total_pay = %report.summary.total_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll request completed successfully"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll request failed"
            );
            Err(json_error(err.into()))
        }
    }
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_error(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
