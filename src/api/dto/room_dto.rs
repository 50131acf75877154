//! Room-related DTOs: rooms, room telemetry, and target parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{RoomParamRow, RoomRow, RoomStatRow};

/// One room, as returned by the room endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomDto {
    /// Room identifier.
    pub id: i64,
    /// Human-readable room name.
    pub name: String,
}

impl From<RoomRow> for RoomDto {
    fn from(row: RoomRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Request body for `POST /rooms`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    /// Room name.
    pub name: String,
}

/// Response body for `POST /rooms` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRoomResponse {
    /// New room identifier.
    pub id: i64,
    /// Room name echoed from the request.
    pub name: String,
}

/// One room-level telemetry reading.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomStatDto {
    /// Stat kind.
    pub kind: String,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

impl From<RoomStatRow> for RoomStatDto {
    fn from(row: RoomStatRow) -> Self {
        Self {
            kind: row.kind,
            value: row.value,
            recorded_at: row.recorded_at,
        }
    }
}

/// Request body for `POST /rooms/{id}/stats`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PushRoomStatRequest {
    /// Stat kind (free-form, e.g. `"humidity"`).
    pub kind: String,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken; defaults to the server clock.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// One current target parameter of a room.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomParamDto {
    /// Parameter kind.
    pub kind: String,
    /// Target value.
    pub value: f64,
    /// When the parameter was last set.
    pub set_at: DateTime<Utc>,
}

impl From<RoomParamRow> for RoomParamDto {
    fn from(row: RoomParamRow) -> Self {
        Self {
            kind: row.kind,
            value: row.value,
            set_at: row.set_at,
        }
    }
}

/// Request body for `PUT /rooms/{id}/params`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoomParamRequest {
    /// Parameter kind (free-form, e.g. `"target_temperature"`).
    pub kind: String,
    /// Target value.
    pub value: f64,
}
