//! Persistence layer: PostgreSQL storage for ward data.
//!
//! [`WardStore`](postgres::WardStore) holds all SQL; the schema lives in
//! the `migrations/` directory and is applied at startup.

pub mod models;
pub mod postgres;

pub use models::{NoteRow, RoomParamRow, RoomRow, RoomStatRow, UserRow, VitalRow};
pub use postgres::WardStore;
