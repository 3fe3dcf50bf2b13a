//! Health Check API Handler
//!
//! Liveness endpoint for monitoring; sits outside `/api/v1` and skips
//! authorization.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
