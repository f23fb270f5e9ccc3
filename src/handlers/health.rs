//! Health check endpoint for the local server.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,
}

/// Health check handler.
///
/// Liveness only: the table is not scanned, so a broken table does not make
/// the process look dead.
///
/// # Response (200 OK)
///
/// ```json
/// { "status": "healthy" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
