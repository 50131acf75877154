//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ChannelBus;
use crate::service::WardService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ward service for all business logic.
    pub ward_service: Arc<WardService>,
    /// Channel bus for live relay sessions.
    pub bus: ChannelBus,
}
