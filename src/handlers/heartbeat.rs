//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and dataset information.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::dates::format_date;
use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub database_path: String,
    pub measurement_count: i64,
    pub station_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    /// End of the one-year window
    pub reference_date: String,
    /// First date of the one-year window
    pub window_start: String,
}

/// Record the process start time; call once at startup
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: dataset_info(&state),
        status: "healthy".to_string(),
    })
}

fn dataset_info(state: &AppState) -> DatasetInfo {
    DatasetInfo {
        database_path: state.store.path().display().to_string(),
        measurement_count: state.summary.measurement_count,
        station_count: state.summary.station_count,
        first_date: state.summary.first_date.clone(),
        last_date: state.summary.last_date.clone(),
        reference_date: format_date(state.reference_date),
        window_start: format_date(state.window_start()),
    }
}
