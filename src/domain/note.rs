//! Free-text clinical notes attached to patients.

use serde::{Deserialize, Serialize};

/// Kind of clinical note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// Clinical analysis write-up.
    Analysis,
    /// Scheduled appointment note.
    Appointment,
}

impl NoteKind {
    /// Stable string form used in the database and in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Appointment => "appointment",
        }
    }
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NoteKind {
    type Err = UnknownNoteKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analysis" => Ok(Self::Analysis),
            "appointment" => Ok(Self::Appointment),
            other => Err(UnknownNoteKind(other.to_string())),
        }
    }
}

/// Error returned when a note kind string is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown note kind: {0}")]
pub struct UnknownNoteKind(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [NoteKind::Analysis, NoteKind::Appointment] {
            let parsed: Result<NoteKind, _> = kind.as_str().parse();
            assert_eq!(parsed.ok(), Some(kind));
        }
    }
}
