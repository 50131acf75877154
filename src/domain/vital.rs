//! Vital-sign readings pushed by ward devices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of vital-sign reading tracked per patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    /// Body temperature in degrees Celsius.
    Temperature,
    /// Body weight in kilograms.
    Weight,
    /// Ventilator on/off status (stored as 0.0 / 1.0).
    Ventilator,
}

impl VitalKind {
    /// Stable string form used in the database and in route paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Weight => "weight",
            Self::Ventilator => "ventilator",
        }
    }
}

impl std::fmt::Display for VitalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VitalKind {
    type Err = UnknownVitalKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Self::Temperature),
            "weight" => Ok(Self::Weight),
            "ventilator" => Ok(Self::Ventilator),
            other => Err(UnknownVitalKind(other.to_string())),
        }
    }
}

/// Error returned when a vital kind string is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown vital kind: {0}")]
pub struct UnknownVitalKind(pub String);

/// One vital-sign measurement for one patient.
///
/// This is also the payload shape published on the patient's live channel:
/// the reading is serialized to JSON and relayed as an opaque text frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalReading {
    /// Patient the reading belongs to.
    pub patient_id: i64,
    /// Kind of measurement.
    pub kind: VitalKind,
    /// Measured value.
    pub value: f64,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

impl VitalReading {
    /// Serializes the reading for publication on a live channel.
    #[must_use]
    pub fn channel_payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [VitalKind::Temperature, VitalKind::Weight, VitalKind::Ventilator] {
            let parsed: Result<VitalKind, _> = kind.as_str().parse();
            assert_eq!(parsed.ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let parsed: Result<VitalKind, _> = "pulse".parse();
        assert!(parsed.is_err());
    }

    #[test]
    fn channel_payload_is_json() {
        let reading = VitalReading {
            patient_id: 2,
            kind: VitalKind::Temperature,
            value: 36.6,
            recorded_at: Utc::now(),
        };
        let payload = reading.channel_payload();
        let parsed: Result<VitalReading, _> = serde_json::from_str(&payload);
        let Ok(parsed) = parsed else {
            panic!("payload should parse back");
        };
        assert_eq!(parsed.patient_id, 2);
        assert_eq!(parsed.kind, VitalKind::Temperature);
    }
}
