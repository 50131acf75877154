//! Clinical note DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::NoteKind;
use crate::persistence::NoteRow;

/// One clinical note.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteDto {
    /// Note identifier.
    pub id: i64,
    /// Patient the note is about.
    pub patient_id: i64,
    /// Staff member who wrote the note.
    pub author_id: i64,
    /// Note kind.
    pub kind: NoteKind,
    /// Free-text body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for NoteDto {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            author_id: row.author_id,
            kind: row.kind,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// Query parameters for `GET /patients/{id}/notes`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NoteListParams {
    /// Restrict the listing to one note kind.
    #[serde(default)]
    pub kind: Option<NoteKind>,
}

/// Request body for `POST /patients/{id}/notes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note kind.
    pub kind: NoteKind,
    /// Free-text body.
    pub text: String,
}

/// Response body for `POST /patients/{id}/notes` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateNoteResponse {
    /// New note identifier.
    pub id: i64,
}
