//! Logging utilities for the surfsup server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::Instant;
use tracing::{error, info, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::SurfsUpError;
use crate::store::DatasetSummary;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    // try_init so a second call (tests, embedding) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Log the completion of a request handler
pub fn log_request_success(endpoint: &str, request_id: &str, start_time: Instant, rows: usize) {
    info!(
        endpoint = endpoint,
        request_id = request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        rows = rows,
        "Request successful"
    );
}

/// Log the dataset that was opened at startup
pub fn log_dataset_stats(database_path: &str, summary: &DatasetSummary) {
    info!(
        operation = "dataset_open",
        database_path = database_path,
        measurement_count = summary.measurement_count,
        station_count = summary.station_count,
        first_date = summary.first_date.as_deref().unwrap_or("none"),
        last_date = summary.last_date.as_deref().unwrap_or("none"),
        "Dataset opened successfully"
    );
}

/// Log an error that occurred during request processing
pub fn log_request_error(
    error: &SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    error!(
        error = %error,
        endpoint = endpoint,
        request_id = request_id,
        params = params.unwrap_or("none"),
        "Request processing error"
    );
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
