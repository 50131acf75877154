//! REST endpoint handlers organized by resource.

pub mod notes;
pub mod patients;
pub mod rooms;
pub mod system;
pub mod vitals;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(rooms::routes())
        .merge(patients::routes())
        .merge(vitals::routes())
        .merge(notes::routes())
        .merge(system::auth_routes())
}
