//! Precipitation endpoint handler.
//!
//! Returns a date → precipitation mapping for the trailing year.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::logging::{generate_request_id, log_request_error, log_request_success};
use crate::state::AppState;
use crate::store::PrecipitationByDate;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let window_start = state.window_start();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        window_start = %window_start,
        "Processing precipitation request"
    );

    let by_date = state
        .store
        .precipitation_since(window_start)
        .await
        .map_err(|e| {
            log_request_error(&e, ENDPOINT, &request_id, None);
            e
        })?;

    log_request_success(ENDPOINT, &request_id, start_time, by_date.len());
    Ok(Json(by_date))
}
