//! Room handlers: room CRUD, membership, telemetry and target parameters.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::auth::AuthUser;
use crate::api::dto::{
    CreateRoomRequest, CreateRoomResponse, HistoryParams, PatientDto, PushRoomStatRequest,
    RoomDto, RoomParamDto, RoomStatDto, SetRoomParamRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, WardError};

/// `GET /rooms` — List all rooms.
///
/// # Errors
///
/// Returns [`WardError`] on persistence failures.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    summary = "List rooms",
    description = "Returns every room on the ward.",
    responses(
        (status = 200, description = "Room list", body = Vec<RoomDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let rooms = state.ward_service.rooms().await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect::<Vec<_>>()))
}

/// `POST /rooms` — Create a new room.
///
/// # Errors
///
/// Returns [`WardError::InvalidRequest`] when the name is empty.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    summary = "Create a room",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = CreateRoomResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, WardError> {
    let id = state.ward_service.create_room(&req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse { id, name: req.name }),
    ))
}

/// `GET /rooms/{id}` — Get one room.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    summary = "Get room details",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = RoomDto),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let room = state.ward_service.room(id).await?;
    Ok(Json(RoomDto::from(room)))
}

/// `GET /rooms/{id}/patients` — List patients assigned to a room.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/patients",
    tag = "Rooms",
    summary = "List patients in a room",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Patients in the room", body = Vec<PatientDto>),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn room_patients(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let patients = state.ward_service.room_patients(id).await?;
    Ok(Json(
        patients.into_iter().map(PatientDto::from).collect::<Vec<_>>(),
    ))
}

/// `GET /rooms/{id}/stats/{kind}` — Latest room readings of one kind.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/stats/{kind}",
    tag = "Rooms",
    summary = "Room telemetry history",
    params(
        ("id" = i64, Path, description = "Room ID"),
        ("kind" = String, Path, description = "Stat kind"),
        HistoryParams,
    ),
    responses(
        (status = 200, description = "Most recent readings, newest first", body = Vec<RoomStatDto>),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn room_stats(
    State(state): State<AppState>,
    Path((id, kind)): Path<(i64, String)>,
    Query(params): Query<HistoryParams>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let params = params.clamped();
    let stats = state
        .ward_service
        .room_stats(id, &kind, i64::from(params.count))
        .await?;
    Ok(Json(
        stats.into_iter().map(RoomStatDto::from).collect::<Vec<_>>(),
    ))
}

/// `POST /rooms/{id}/stats` — Record a room reading and publish it live.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/stats",
    tag = "Rooms",
    summary = "Record room telemetry",
    description = "Stores the reading and publishes it on the room's live channel.",
    params(("id" = i64, Path, description = "Room ID")),
    request_body = PushRoomStatRequest,
    responses(
        (status = 201, description = "Reading stored"),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn push_room_stat(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<PushRoomStatRequest>,
) -> Result<impl IntoResponse, WardError> {
    let recorded_at = req.recorded_at.unwrap_or_else(Utc::now);
    state
        .ward_service
        .record_room_stat(id, &req.kind, req.value, recorded_at)
        .await?;
    Ok(StatusCode::CREATED)
}

/// `GET /rooms/{id}/params` — Current target parameters, latest per kind.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/params",
    tag = "Rooms",
    summary = "Room target parameters",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Current parameters", body = Vec<RoomParamDto>),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn room_params(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
) -> Result<impl IntoResponse, WardError> {
    let params = state.ward_service.room_params(id).await?;
    Ok(Json(
        params.into_iter().map(RoomParamDto::from).collect::<Vec<_>>(),
    ))
}

/// `PUT /rooms/{id}/params` — Set a target parameter for a room.
///
/// # Errors
///
/// Returns [`WardError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}/params",
    tag = "Rooms",
    summary = "Set a room target parameter",
    params(("id" = i64, Path, description = "Room ID")),
    request_body = SetRoomParamRequest,
    responses(
        (status = 204, description = "Parameter stored"),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn set_room_param(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<SetRoomParamRequest>,
) -> Result<impl IntoResponse, WardError> {
    state
        .ward_service
        .set_room_param(id, &req.kind, req.value)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Room management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/patients", get(room_patients))
        .route("/rooms/{id}/stats/{kind}", get(room_stats))
        .route("/rooms/{id}/stats", axum::routing::post(push_room_stat))
        .route("/rooms/{id}/params", get(room_params).put(set_room_param))
}
