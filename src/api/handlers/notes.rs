//! Clinical note handlers: analyses and appointments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{CreateNoteRequest, CreateNoteResponse, NoteDto, NoteListParams};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, WardError};

/// `GET /patients/{id}/notes` — Notes for a patient, newest first.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/notes",
    tag = "Notes",
    summary = "List notes for a patient",
    params(
        ("id" = i64, Path, description = "Patient ID"),
        NoteListParams,
    ),
    responses(
        (status = 200, description = "Notes, newest first", body = Vec<NoteDto>),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<NoteListParams>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let notes = state.ward_service.notes(id, params.kind).await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect::<Vec<_>>()))
}

/// `POST /patients/{id}/notes` — Create a note authored by the caller.
///
/// # Errors
///
/// Returns [`WardError::PatientNotFound`] if the patient does not exist,
/// or [`WardError::InvalidRequest`] when the text is empty.
#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/notes",
    tag = "Notes",
    summary = "Create a note",
    params(("id" = i64, Path, description = "Patient ID")),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = CreateNoteResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AuthUser(author): AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, WardError> {
    let note_id = state
        .ward_service
        .create_note(id, author.id, req.kind, &req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateNoteResponse { id: note_id })))
}

/// Note routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/patients/{id}/notes", get(list_notes).post(create_note))
}
