//! Error types for the surfsup application.
//!
//! This module defines the error enum covering every failure in the service,
//! together with its mapping onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Message returned to clients for any malformed date path segment.
pub const INVALID_DATE_MESSAGE: &str = "Date format should be YYYY-MM-DD";

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// Database driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The dataset does not have the expected tables or columns
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A path segment that is not a strict YYYY-MM-DD date
    #[error("{}", INVALID_DATE_MESSAGE)]
    InvalidDate { input: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// HTTP status this error maps to when it escapes a handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsUpError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SurfsUpError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
