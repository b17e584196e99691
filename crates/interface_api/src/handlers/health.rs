//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Only reported by the readiness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl HealthResponse {
    fn new(status: &str, database: Option<&str>) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.map(str::to_string),
        }
    }
}

/// `GET /health`: the process is up
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", None))
}

/// `GET /health/ready`: 503 until the database answers
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match infra_db::check_connection(state.repositories.pool()).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new("ready", Some("up")))),
        Err(err) => {
            warn!(error = %err, "Database unreachable, reporting not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("unavailable", Some("down"))),
            )
        }
    }
}
