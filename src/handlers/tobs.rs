//! Temperature observations endpoint handler.
//!
//! Returns the trailing year of temperature observations as a flat list.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::logging::{generate_request_id, log_request_error, log_request_success};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Option<f64>>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let window_start = state.window_start();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        window_start = %window_start,
        "Processing tobs request"
    );

    let temperatures = state
        .store
        .temperatures_since(window_start)
        .await
        .map_err(|e| {
            log_request_error(&e, ENDPOINT, &request_id, None);
            e
        })?;

    log_request_success(ENDPOINT, &request_id, start_time, temperatures.len());
    Ok(Json(temperatures))
}
