//! Naming scheme for live telemetry channels.
//!
//! The bus treats channel names as opaque strings; these helpers are the
//! single place where the REST side and WebSocket clients agree on names.

/// Channel carrying live vitals for one patient.
#[must_use]
pub fn patient_channel(patient_id: i64) -> String {
    format!("patient-{patient_id}")
}

/// Channel carrying live telemetry for one room.
#[must_use]
pub fn room_channel(room_id: i64) -> String {
    format!("room-{room_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_are_stable() {
        assert_eq!(patient_channel(2), "patient-2");
        assert_eq!(room_channel(6), "room-6");
    }
}
