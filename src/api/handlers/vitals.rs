//! Vital-sign recording handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::auth::AuthUser;
use crate::api::dto::{PushVitalRequest, PushVitalResponse};
use crate::app_state::AppState;
use crate::domain::VitalReading;
use crate::error::{ErrorResponse, WardError};

/// `POST /vitals` — Record a vital-sign reading.
///
/// The reading is persisted and then published on the patient's live
/// channel so subscribed viewers see it immediately.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/vitals",
    tag = "Vitals",
    summary = "Record a vital-sign reading",
    description = "Stores the reading and publishes it on the patient's live channel.",
    request_body = PushVitalRequest,
    responses(
        (status = 201, description = "Reading stored", body = PushVitalResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn push_vital(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<PushVitalRequest>,
) -> Result<impl IntoResponse, WardError> {
    let reading = VitalReading {
        patient_id: req.patient_id,
        kind: req.kind,
        value: req.value,
        recorded_at: req.recorded_at.unwrap_or_else(Utc::now),
    };
    let id = state.ward_service.record_vital(reading.clone()).await?;

    let response = PushVitalResponse {
        id,
        patient_id: reading.patient_id,
        kind: reading.kind,
        value: reading.value,
        recorded_at: reading.recorded_at,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Vital-sign routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/vitals", post(push_vital))
}
