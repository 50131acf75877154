//! WebSocket layer: the live relay between connections and channels.
//!
//! The endpoint at `/ws/{channel_id}` binds each connection to one named
//! channel and relays opaque text frames between all parties subscribed
//! to that channel.

pub mod handler;
pub mod relay;
pub mod session;
pub mod transport;

pub use relay::RelayEnd;
pub use session::{RelaySession, SessionState};
