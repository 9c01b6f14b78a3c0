//! Root endpoint handler.
//!
//! Lists the available API routes as an HTML-flavored text body.

use axum::response::Html;

/// Body served at `/`
pub const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/&lt;start&gt;<br/>",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>",
);

/// Handle GET / requests
pub async fn welcome_handler() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}
