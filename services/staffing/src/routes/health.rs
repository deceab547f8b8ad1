use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::metrics;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "staffing-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus scrape endpoint
///
/// # Errors
///
/// Returns 500 if the registry cannot be encoded.
pub async fn metrics_handler() -> Result<impl IntoResponse, ApiError> {
    let body = metrics::render()?;
    Ok(([(CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
