//! Patient DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::UserRow;

/// One patient, as returned by the patient and room-membership endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientDto {
    /// Patient identifier.
    pub id: i64,
    /// Unique login name.
    pub login: String,
    /// Display name, when known.
    pub full_name: Option<String>,
}

impl From<UserRow> for PatientDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            login: row.login,
            full_name: row.full_name,
        }
    }
}
