//! # surfsup
//!
//! A small read-only HTTP API over a SQLite climate observation dataset.
//!
//! The service opens a station/measurement dataset once at startup and answers
//! five JSON routes: trailing-year precipitation and temperature observations,
//! the list of stations, and min/max/avg temperature over a date range.
//!
//! ## Architecture
//!
//! - **Data Layer**: [`store::ClimateStore`] owns a read-only connection pool and
//!   checks the dataset schema before serving
//! - **API Layer**: [`handlers`] maps routes onto store queries and shapes JSON
//! - **Ambient**: layered [`config`], [`error`] mapping onto HTTP statuses and
//!   structured [`logging`]

pub mod config;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;


pub use config::{Config, ReferenceDate};
pub use error::{Result, SurfsUpError};
pub use handlers::create_router;
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats,
    log_request_error, log_request_success,
};
pub use models::{Measurement, Station, TemperatureStats};
pub use state::AppState;
pub use store::{ClimateStore, DatasetSummary, PrecipitationByDate};
