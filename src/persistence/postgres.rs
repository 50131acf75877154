//! PostgreSQL repository for ward data.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{NoteRow, RoomParamRow, RoomRow, RoomStatRow, UserRow, VitalRow};
use crate::domain::{NoteKind, VitalKind, VitalReading};
use crate::error::WardError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct WardStore {
    pool: PgPool,
}

impl WardStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Looks up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn user_by_id(&self, id: i64) -> Result<Option<UserRow>, WardError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT id, login, full_name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, login, full_name)| UserRow {
            id,
            login,
            full_name,
        }))
    }

    /// Looks up a user by login.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn user_by_login(&self, login: &str) -> Result<Option<UserRow>, WardError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT id, login, full_name FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, login, full_name)| UserRow {
            id,
            login,
            full_name,
        }))
    }

    /// Resolves a bearer token to its user, if the token is known.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn user_for_token(&self, token: &str) -> Result<Option<UserRow>, WardError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT u.id, u.login, u.full_name FROM users u \
             JOIN auth_tokens t ON t.user_id = u.id WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, login, full_name)| UserRow {
            id,
            login,
            full_name,
        }))
    }

    /// Creates a user, returning the new row ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn create_user(
        &self,
        login: &str,
        full_name: Option<&str>,
    ) -> Result<i64, WardError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (login, full_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(login)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // ── Rooms ───────────────────────────────────────────────────────────

    /// Lists all rooms.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn rooms(&self) -> Result<Vec<RoomRow>, WardError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM rooms ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id, name)| RoomRow { id, name }).collect())
    }

    /// Looks up a room by ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn room_by_id(&self, id: i64) -> Result<Option<RoomRow>, WardError> {
        let row = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, name)| RoomRow { id, name }))
    }

    /// Creates a room, returning the new row ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn create_room(&self, name: &str) -> Result<i64, WardError> {
        let id = sqlx::query_scalar::<_, i64>("INSERT INTO rooms (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    /// Lists the patients assigned to a room.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn patients_in_room(&self, room_id: i64) -> Result<Vec<UserRow>, WardError> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT u.id, u.login, u.full_name FROM users u \
             JOIN users_rooms ur ON ur.user_id = u.id \
             WHERE ur.room_id = $1 ORDER BY u.id",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, login, full_name)| UserRow {
                id,
                login,
                full_name,
            })
            .collect())
    }

    // ── Vitals ──────────────────────────────────────────────────────────

    /// Inserts a vital-sign reading, returning the new row ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn insert_vital(&self, reading: &VitalReading) -> Result<i64, WardError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO vitals (patient_id, kind, value, recorded_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(reading.patient_id)
        .bind(reading.kind.as_str())
        .bind(reading.value)
        .bind(reading.recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Loads the latest `count` readings of one kind for a patient,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure or
    /// when a stored kind no longer parses.
    pub async fn latest_vitals(
        &self,
        patient_id: i64,
        kind: VitalKind,
        count: i64,
    ) -> Result<Vec<VitalRow>, WardError> {
        let rows = sqlx::query_as::<_, (i64, i64, String, f64, DateTime<Utc>)>(
            "SELECT id, patient_id, kind, value, recorded_at FROM vitals \
             WHERE patient_id = $1 AND kind = $2 \
             ORDER BY recorded_at DESC LIMIT $3",
        )
        .bind(patient_id)
        .bind(kind.as_str())
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        let mut vitals = Vec::with_capacity(rows.len());
        for (id, patient_id, kind, value, recorded_at) in rows {
            let kind: VitalKind = kind
                .parse()
                .map_err(|err| WardError::PersistenceError(format!("corrupt vitals row: {err}")))?;
            vitals.push(VitalRow {
                id,
                patient_id,
                kind,
                value,
                recorded_at,
            });
        }
        Ok(vitals)
    }

    // ── Room telemetry ──────────────────────────────────────────────────

    /// Inserts a room-level reading, returning the new row ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn insert_room_stat(
        &self,
        room_id: i64,
        kind: &str,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, WardError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO room_stats (room_id, kind, value, recorded_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(room_id)
        .bind(kind)
        .bind(value)
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Loads the latest `count` room readings of one kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn latest_room_stats(
        &self,
        room_id: i64,
        kind: &str,
        count: i64,
    ) -> Result<Vec<RoomStatRow>, WardError> {
        let rows = sqlx::query_as::<_, (i64, i64, String, f64, DateTime<Utc>)>(
            "SELECT id, room_id, kind, value, recorded_at FROM room_stats \
             WHERE room_id = $1 AND kind = $2 \
             ORDER BY recorded_at DESC LIMIT $3",
        )
        .bind(room_id)
        .bind(kind)
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, room_id, kind, value, recorded_at)| RoomStatRow {
                id,
                room_id,
                kind,
                value,
                recorded_at,
            })
            .collect())
    }

    /// Records a target parameter for a room.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn set_room_param(
        &self,
        room_id: i64,
        kind: &str,
        value: f64,
    ) -> Result<(), WardError> {
        sqlx::query("INSERT INTO room_params (room_id, kind, value, set_at) VALUES ($1, $2, $3, $4)")
            .bind(room_id)
            .bind(kind)
            .bind(value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Loads the current target parameters for a room, latest value per
    /// kind, using `DISTINCT ON`.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn room_params(&self, room_id: i64) -> Result<Vec<RoomParamRow>, WardError> {
        let rows = sqlx::query_as::<_, (String, f64, DateTime<Utc>)>(
            "SELECT DISTINCT ON (kind) kind, value, set_at FROM room_params \
             WHERE room_id = $1 ORDER BY kind, set_at DESC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(kind, value, set_at)| RoomParamRow { kind, value, set_at })
            .collect())
    }

    // ── Notes ───────────────────────────────────────────────────────────

    /// Loads notes for a patient, optionally filtered by kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure or
    /// when a stored kind no longer parses.
    pub async fn notes_for_patient(
        &self,
        patient_id: i64,
        kind: Option<NoteKind>,
    ) -> Result<Vec<NoteRow>, WardError> {
        let rows = if let Some(kind) = kind {
            sqlx::query_as::<_, (i64, i64, i64, String, String, DateTime<Utc>)>(
                "SELECT id, patient_id, author_id, kind, text, created_at FROM notes \
                 WHERE patient_id = $1 AND kind = $2 ORDER BY created_at DESC",
            )
            .bind(patient_id)
            .bind(kind.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, (i64, i64, i64, String, String, DateTime<Utc>)>(
                "SELECT id, patient_id, author_id, kind, text, created_at FROM notes \
                 WHERE patient_id = $1 ORDER BY created_at DESC",
            )
            .bind(patient_id)
            .fetch_all(&self.pool)
            .await
        }?;

        let mut notes = Vec::with_capacity(rows.len());
        for (id, patient_id, author_id, kind, text, created_at) in rows {
            let kind: NoteKind = kind
                .parse()
                .map_err(|err| WardError::PersistenceError(format!("corrupt notes row: {err}")))?;
            notes.push(NoteRow {
                id,
                patient_id,
                author_id,
                kind,
                text,
                created_at,
            });
        }
        Ok(notes)
    }

    /// Creates a note, returning the new row ID.
    ///
    /// # Errors
    ///
    /// Returns a [`WardError::PersistenceError`] on database failure.
    pub async fn create_note(
        &self,
        patient_id: i64,
        author_id: i64,
        kind: NoteKind,
        text: &str,
    ) -> Result<i64, WardError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO notes (patient_id, author_id, kind, text) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(patient_id)
        .bind(author_id)
        .bind(kind.as_str())
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
