//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that dispatches to them.

pub mod heartbeat;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;
pub mod welcome;

pub use heartbeat::heartbeat_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{start_end_handler, start_handler};
pub use tobs::tobs_handler;
pub use welcome::welcome_handler;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the router serving every route
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_handler))
        .route("/api/v1.0/:start/:end", get(start_end_handler))
        .layer(create_http_trace_layer())
        .with_state(state)
}
