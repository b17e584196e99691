//! Access log

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// One line per request with its route template, status and latency
///
/// Runs inside the request-id layer, so the id it logs matches the one
/// echoed back in the response headers.
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let started = Utc::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = (Utc::now() - started).num_milliseconds();
    if response.status().is_server_error() {
        warn!(%method, %route, %request_id, status, elapsed_ms, "Request failed");
    } else {
        info!(%method, %route, %request_id, status, elapsed_ms, "Request served");
    }
    response
}
