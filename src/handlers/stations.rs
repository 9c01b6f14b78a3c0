//! Stations endpoint handler.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::logging::{generate_request_id, log_request_error, log_request_success};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let stations = state.store.distinct_stations().await.map_err(|e| {
        log_request_error(&e, ENDPOINT, &request_id, None);
        e
    })?;

    log_request_success(ENDPOINT, &request_id, start_time, stations.len());
    Ok(Json(stations))
}
