//! Patient handlers: details, vital-sign history, ventilator status.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{HistoryParams, PatientDto, VitalDto};
use crate::app_state::AppState;
use crate::domain::VitalKind;
use crate::error::{ErrorResponse, WardError};

/// `GET /patients/{id}` — Get one patient.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    tag = "Patients",
    summary = "Get patient details",
    params(("id" = i64, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient details", body = PatientDto),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let patient = state.ward_service.patient(id).await?;
    Ok(Json(PatientDto::from(patient)))
}

/// `GET /patients/{id}/vitals/{kind}` — Latest readings of one kind.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist,
/// or [`WardError::InvalidVitalKind`] for an unknown kind.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/vitals/{kind}",
    tag = "Patients",
    summary = "Vital-sign history",
    description = "Returns the most recent readings of one kind, newest first.",
    params(
        ("id" = i64, Path, description = "Patient ID"),
        ("kind" = String, Path, description = "temperature | weight | ventilator"),
        HistoryParams,
    ),
    responses(
        (status = 200, description = "Most recent readings, newest first", body = Vec<VitalDto>),
        (status = 400, description = "Unknown vital kind", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn vitals_log(
    State(state): State<AppState>,
    Path((id, kind)): Path<(i64, String)>,
    Query(params): Query<HistoryParams>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let kind: VitalKind = kind.parse()?;
    let params = params.clamped();
    let vitals = state
        .ward_service
        .vitals_log(id, kind, i64::from(params.count))
        .await?;
    Ok(Json(
        vitals.into_iter().map(VitalDto::from).collect::<Vec<_>>(),
    ))
}

/// `GET /patients/{id}/ventilator` — Current ventilator status.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/ventilator",
    tag = "Patients",
    summary = "Ventilator status",
    description = "Current status derived from the latest ventilator reading; false when there is none.",
    params(("id" = i64, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Ventilator on/off", body = bool),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn ventilator_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let on = state.ward_service.ventilator_status(id).await?;
    Ok(Json(on))
}

/// Patient routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients/{id}", get(get_patient))
        .route("/patients/{id}/vitals/{kind}", get(vitals_log))
        .route("/patients/{id}/ventilator", get(ventilator_status))
}
