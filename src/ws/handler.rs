//! Axum WebSocket upgrade handler for channel relay sessions.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::session::RelaySession;
use super::transport::WsTransport;
use crate::app_state::AppState;

/// `GET /ws/{channel_id}` — Upgrade to WebSocket and relay on the channel.
///
/// The connection is bound to `channel_id` for its entire lifetime:
/// inbound frames are published to the channel, and everything published
/// to the channel is pushed back out. The session tears down both
/// directions together when either side terminates.
pub async fn relay_handler(
    ws: WebSocketUpgrade,
    Path(channel_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let bus = state.bus.clone();
    ws.on_upgrade(move |socket| async move {
        let mut session = RelaySession::new(channel_id);
        session.run(WsTransport::new(socket), &bus).await;
    })
}
