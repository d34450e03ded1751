//! Health check handlers

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    db::connection::test_connection,
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Liveness: the process answers
async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse::new("healthy"))
}

/// Readiness: the database answers too
async fn readiness_check(State(state): State<AppState>) -> AppResult<ApiResponse<HealthResponse>> {
    test_connection(state.db()).await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        AppError::Database(e.to_string())
    })?;
    Ok(ApiResponse::success(HealthResponse::new("ready")))
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}
