//! Temperature aggregate endpoint handlers.
//!
//! `/api/v1.0/:start` and `/api/v1.0/:start/:end` return `[min, max, avg]` of
//! the temperature observations inside the requested date range. Both bounds
//! are inclusive.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::dates::parse_date;
use crate::error::{Result, SurfsUpError};
use crate::logging::{generate_request_id, log_request_error};
use crate::models::TemperatureStats;
use crate::state::AppState;

/// Handle GET /api/v1.0/:start requests
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureStats>> {
    let request_id = generate_request_id();
    let Path(start) = path.map_err(|e| reject_path(e, "/api/v1.0/:start", &request_id))?;
    let params = format!("start={}", start);

    let range = parse_date(&start)
        .map(|start| (start, None))
        .map_err(|e| reject(e, "/api/v1.0/:start", &request_id, &params))?;

    aggregate(&state, range, "/api/v1.0/:start", &request_id, &params).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn start_end_handler(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureStats>> {
    let request_id = generate_request_id();
    let Path((start, end)) =
        path.map_err(|e| reject_path(e, "/api/v1.0/:start/:end", &request_id))?;
    let params = format!("start={}, end={}", start, end);

    let range = parse_date(&start)
        .and_then(|start| Ok((start, Some(parse_date(&end)?))))
        .map_err(|e| reject(e, "/api/v1.0/:start/:end", &request_id, &params))?;

    aggregate(&state, range, "/api/v1.0/:start/:end", &request_id, &params).await
}

async fn aggregate(
    state: &AppState,
    (start, end): (NaiveDate, Option<NaiveDate>),
    endpoint: &str,
    request_id: &str,
    params: &str,
) -> Result<Json<TemperatureStats>> {
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = %start,
        end = ?end,
        "Processing temperature aggregate request"
    );

    let stats = state
        .store
        .temperature_stats(start, end)
        .await
        .map_err(|e| {
            log_request_error(&e, endpoint, request_id, Some(params));
            e
        })?;

    info!(
        endpoint = endpoint,
        request_id = %request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        matched = !stats.is_empty(),
        "Temperature aggregate request successful"
    );

    Ok(Json(stats))
}

/// A segment that does not even decode (e.g. invalid UTF-8) is a malformed date too
fn reject_path(rejection: PathRejection, endpoint: &str, request_id: &str) -> SurfsUpError {
    let input = rejection.body_text();
    reject(
        SurfsUpError::InvalidDate {
            input: input.clone(),
        },
        endpoint,
        request_id,
        &input,
    )
}

fn reject(error: SurfsUpError, endpoint: &str, request_id: &str, params: &str) -> SurfsUpError {
    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        params = params,
        "Rejected malformed date"
    );
    error
}
