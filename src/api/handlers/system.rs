//! System endpoints: health check and token validation.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::auth::bearer_token;
use crate::app_state::AppState;
use crate::error::WardError;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /api/v1/auth/check` — Validate the caller's bearer token.
///
/// Unlike the other endpoints this never rejects with 401: it answers
/// `true` or `false` so clients can probe a stored token.
///
/// # Errors
///
/// Returns [`WardError`] on persistence failures only.
#[utoipa::path(
    get,
    path = "/api/v1/auth/check",
    tag = "System",
    summary = "Validate a bearer token",
    responses(
        (status = 200, description = "Whether the token resolves to a user", body = bool),
    )
)]
pub async fn check_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WardError> {
    let valid = match bearer_token(&headers) {
        Some(token) => state.ward_service.authenticate(token).await?.is_some(),
        None => false,
    };
    Ok(Json(valid))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// Auth routes mounted under /api/v1.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/check", get(check_token))
}
