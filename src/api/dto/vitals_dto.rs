//! Vital-sign DTOs for recording and history endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::VitalKind;
use crate::persistence::VitalRow;

/// One vital-sign reading in a history response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VitalDto {
    /// Kind of measurement.
    pub kind: VitalKind,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

impl From<VitalRow> for VitalDto {
    fn from(row: VitalRow) -> Self {
        Self {
            kind: row.kind,
            value: row.value,
            recorded_at: row.recorded_at,
        }
    }
}

/// Request body for `POST /vitals`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PushVitalRequest {
    /// Patient the reading belongs to.
    pub patient_id: i64,
    /// Kind of measurement.
    pub kind: VitalKind,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken; defaults to the server clock.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Response body for `POST /vitals` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct PushVitalResponse {
    /// New reading identifier.
    pub id: i64,
    /// Patient the reading belongs to.
    pub patient_id: i64,
    /// Kind of measurement.
    pub kind: VitalKind,
    /// Measured value.
    pub value: f64,
    /// Timestamp the reading was stored with.
    pub recorded_at: DateTime<Utc>,
}
