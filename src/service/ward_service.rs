//! Ward service: orchestrates storage and live publication.

use chrono::{DateTime, Utc};

use crate::domain::channel::{patient_channel, room_channel};
use crate::domain::{ChannelBus, NoteKind, VitalKind, VitalReading};
use crate::error::WardError;
use crate::persistence::{NoteRow, RoomParamRow, RoomRow, RoomStatRow, UserRow, VitalRow, WardStore};

/// Orchestration layer for all ward operations.
///
/// Stateless coordinator: owns the [`WardStore`] for persistence and the
/// [`ChannelBus`] for live fan-out. Every recorded reading follows the
/// pattern: validate → persist → publish to the live channel → return.
#[derive(Debug, Clone)]
pub struct WardService {
    store: WardStore,
    bus: ChannelBus,
}

impl WardService {
    /// Creates a new `WardService`.
    #[must_use]
    pub fn new(store: WardStore, bus: ChannelBus) -> Self {
        Self { store, bus }
    }

    /// Returns a reference to the inner [`ChannelBus`].
    #[must_use]
    pub fn bus(&self) -> &ChannelBus {
        &self.bus
    }

    // ── Auth ────────────────────────────────────────────────────────────

    /// Resolves a bearer token to a user, `None` when the token is unknown.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError`] on persistence failure.
    pub async fn authenticate(&self, token: &str) -> Result<Option<UserRow>, WardError> {
        self.store.user_for_token(token).await
    }

    // ── Rooms ───────────────────────────────────────────────────────────

    /// Lists all rooms.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError`] on persistence failure.
    pub async fn rooms(&self) -> Result<Vec<RoomRow>, WardError> {
        self.store.rooms().await
    }

    /// Returns one room.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if no room with the given ID
    /// exists.
    pub async fn room(&self, room_id: i64) -> Result<RoomRow, WardError> {
        self.store
            .room_by_id(room_id)
            .await?
            .ok_or(WardError::RoomNotFound(room_id))
    }

    /// Creates a room and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::InvalidRequest`] when the name is empty.
    pub async fn create_room(&self, name: &str) -> Result<i64, WardError> {
        if name.trim().is_empty() {
            return Err(WardError::InvalidRequest("room name must not be empty".to_string()));
        }
        let room_id = self.store.create_room(name).await?;
        tracing::info!(room_id, name, "room created");
        Ok(room_id)
    }

    /// Lists the patients assigned to a room.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if the room does not exist.
    pub async fn room_patients(&self, room_id: i64) -> Result<Vec<UserRow>, WardError> {
        self.room(room_id).await?;
        self.store.patients_in_room(room_id).await
    }

    // ── Patients & vitals ───────────────────────────────────────────────

    /// Returns one patient.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if no user with the given ID
    /// exists.
    pub async fn patient(&self, patient_id: i64) -> Result<UserRow, WardError> {
        self.store
            .user_by_id(patient_id)
            .await?
            .ok_or(WardError::PatientNotFound(patient_id))
    }

    /// Records a vital-sign reading and publishes it on the patient's
    /// live channel.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if the patient does not
    /// exist, or a persistence error.
    pub async fn record_vital(&self, reading: VitalReading) -> Result<i64, WardError> {
        self.patient(reading.patient_id).await?;
        let id = self.store.insert_vital(&reading).await?;

        let delivered = self
            .bus
            .publish(&patient_channel(reading.patient_id), reading.channel_payload());

        tracing::info!(
            patient_id = reading.patient_id,
            kind = %reading.kind,
            value = reading.value,
            delivered,
            "vital recorded"
        );
        Ok(id)
    }

    /// Returns the latest readings of one kind for a patient, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if the patient does not
    /// exist, or a persistence error.
    pub async fn vitals_log(
        &self,
        patient_id: i64,
        kind: VitalKind,
        count: i64,
    ) -> Result<Vec<VitalRow>, WardError> {
        self.patient(patient_id).await?;
        self.store.latest_vitals(patient_id, kind, count).await
    }

    /// Returns the patient's current ventilator status.
    ///
    /// The status is derived from the most recent `ventilator` reading;
    /// a patient with no readings is reported as off.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if the patient does not
    /// exist, or a persistence error.
    pub async fn ventilator_status(&self, patient_id: i64) -> Result<bool, WardError> {
        self.patient(patient_id).await?;
        let latest = self
            .store
            .latest_vitals(patient_id, VitalKind::Ventilator, 1)
            .await?;
        Ok(latest.first().is_some_and(|row| row.value > 0.5))
    }

    // ── Room telemetry ──────────────────────────────────────────────────

    /// Records a room-level reading and publishes it on the room's live
    /// channel.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if the room does not exist, or
    /// a persistence error.
    pub async fn record_room_stat(
        &self,
        room_id: i64,
        kind: &str,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, WardError> {
        self.room(room_id).await?;
        let id = self
            .store
            .insert_room_stat(room_id, kind, value, recorded_at)
            .await?;

        let payload = serde_json::json!({
            "room_id": room_id,
            "kind": kind,
            "value": value,
            "recorded_at": recorded_at,
        })
        .to_string();
        let delivered = self.bus.publish(&room_channel(room_id), payload);

        tracing::info!(room_id, kind, value, delivered, "room stat recorded");
        Ok(id)
    }

    /// Returns the latest room readings of one kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if the room does not exist, or
    /// a persistence error.
    pub async fn room_stats(
        &self,
        room_id: i64,
        kind: &str,
        count: i64,
    ) -> Result<Vec<RoomStatRow>, WardError> {
        self.room(room_id).await?;
        self.store.latest_room_stats(room_id, kind, count).await
    }

    /// Sets a target parameter for a room.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if the room does not exist, or
    /// a persistence error.
    pub async fn set_room_param(
        &self,
        room_id: i64,
        kind: &str,
        value: f64,
    ) -> Result<(), WardError> {
        self.room(room_id).await?;
        self.store.set_room_param(room_id, kind, value).await?;
        tracing::info!(room_id, kind, value, "room param set");
        Ok(())
    }

    /// Returns the current target parameters of a room, latest per kind.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::RoomNotFound`] if the room does not exist, or
    /// a persistence error.
    pub async fn room_params(&self, room_id: i64) -> Result<Vec<RoomParamRow>, WardError> {
        self.room(room_id).await?;
        self.store.room_params(room_id).await
    }

    // ── Notes ───────────────────────────────────────────────────────────

    /// Lists notes for a patient, optionally filtered by kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if the patient does not
    /// exist, or a persistence error.
    pub async fn notes(
        &self,
        patient_id: i64,
        kind: Option<NoteKind>,
    ) -> Result<Vec<NoteRow>, WardError> {
        self.patient(patient_id).await?;
        self.store.notes_for_patient(patient_id, kind).await
    }

    /// Creates a note about a patient, authored by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WardError::PatientNotFound`] if the patient does not
    /// exist, [`WardError::InvalidRequest`] when the text is empty, or a
    /// persistence error.
    pub async fn create_note(
        &self,
        patient_id: i64,
        author_id: i64,
        kind: NoteKind,
        text: &str,
    ) -> Result<i64, WardError> {
        if text.trim().is_empty() {
            return Err(WardError::InvalidRequest("note text must not be empty".to_string()));
        }
        self.patient(patient_id).await?;
        let id = self.store.create_note(patient_id, author_id, kind, text).await?;
        tracing::info!(patient_id, author_id, kind = %kind, "note created");
        Ok(id)
    }
}
