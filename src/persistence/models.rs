//! Database row models for users, rooms, readings and notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NoteKind, VitalKind};

/// A row from the `users` table. Patients and staff share this table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Unique login name.
    pub login: String,
    /// Display name, when known.
    pub full_name: Option<String>,
}

/// A row from the `rooms` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Human-readable room name.
    pub name: String,
}

/// A stored vital-sign reading from the `vitals` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Patient the reading belongs to.
    pub patient_id: i64,
    /// Kind of measurement.
    pub kind: VitalKind,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

/// A room-level telemetry reading from the `room_stats` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStatRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Room the reading belongs to.
    pub room_id: i64,
    /// Free-form stat kind (e.g. `"humidity"`).
    pub kind: String,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

/// Current target parameter for a room, latest value per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomParamRow {
    /// Free-form parameter kind (e.g. `"target_temperature"`).
    pub kind: String,
    /// Target value.
    pub value: f64,
    /// When the parameter was last set.
    pub set_at: DateTime<Utc>,
}

/// A clinical note from the `notes` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Patient the note is about.
    pub patient_id: i64,
    /// Staff member who wrote the note.
    pub author_id: i64,
    /// Note kind.
    pub kind: NoteKind,
    /// Free-text body.
    pub text: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
