//! Lifecycle management for one relay connection.
//!
//! A [`RelaySession`] owns the accept → relay → teardown sequence for a
//! single connection bound to a single channel. The state machine is
//! strictly linear; the session guarantees the subscription is released
//! and the transport closed exactly once, whichever pump terminates first.

use crate::domain::ChannelBus;

use super::relay::relay;
use super::transport::{FrameWriter, RelayTransport};

/// Lifecycle states of a relay session.
///
/// Transitions are strictly `Accepting → Active → Terminating → Closed`;
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Handshake in progress; the transport is not yet usable.
    Accepting,
    /// Both pumps are running.
    Active,
    /// One pump terminated; the sibling is being cancelled and joined.
    Terminating,
    /// Both pumps joined and the transport closed. Terminal.
    Closed,
}

/// One connection's relay session, bound to a single channel for its
/// entire lifetime.
#[derive(Debug)]
pub struct RelaySession {
    id: uuid::Uuid,
    channel: String,
    state: SessionState,
}

impl RelaySession {
    /// Creates a session in the `Accepting` state.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            channel: channel.into(),
            state: SessionState::Accepting,
        }
    }

    /// Correlation ID for log lines of this session.
    #[must_use]
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    /// The channel this session is bound to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the session to completion: relays between the transport and
    /// the channel until either direction terminates, then tears down.
    ///
    /// On return the session is `Closed`, its subscription is released and
    /// the transport has been closed exactly once.
    ///
    /// # Panics
    ///
    /// Panics if the session is not in the `Accepting` state; running a
    /// session twice is a lifecycle bug in the caller.
    pub async fn run<T: RelayTransport>(&mut self, transport: T, bus: &ChannelBus) {
        let (mut reader, mut writer) = transport.split();
        self.advance(SessionState::Active);
        tracing::debug!(session_id = %self.id, channel = %self.channel, "relay session active");

        let end = relay(&mut reader, &mut writer, &self.channel, bus).await;
        self.advance(SessionState::Terminating);

        // The losing pump was already cancelled and dropped by the relay;
        // all that remains is to close the transport.
        if let Err(err) = writer.close().await {
            tracing::debug!(session_id = %self.id, error = %err, "transport close failed");
        }
        self.advance(SessionState::Closed);
        tracing::debug!(session_id = %self.id, channel = %self.channel, ?end, "relay session closed");
    }

    /// Moves the state machine one step forward.
    fn advance(&mut self, next: SessionState) {
        use SessionState::{Accepting, Active, Closed, Terminating};
        let legal = matches!(
            (self.state, next),
            (Accepting, Active) | (Active, Terminating) | (Terminating, Closed)
        );
        assert!(
            legal,
            "illegal session transition: {:?} -> {next:?}",
            self.state
        );
        self.state = next;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::transport::mock;
    use super::*;
    use crate::domain::ChannelBus;

    #[tokio::test]
    async fn session_closes_cleanly_after_peer_disconnect() {
        let bus = ChannelBus::new(16);
        let (transport, mut peer) = mock::pair();
        let mut session = RelaySession::new("room-1");
        assert_eq!(session.state(), SessionState::Accepting);

        peer.send("36.6");
        peer.disconnect();
        session.run(transport, &bus).await;

        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(peer.close_count(), 1);
        assert_eq!(bus.subscriber_count("room-1"), 0);
    }

    #[tokio::test]
    async fn readings_flow_through_a_session_in_order() {
        let bus = ChannelBus::new(16);
        let mut observer = bus.subscribe("room-1");

        let (transport, mut peer) = mock::pair();
        peer.send("36.6");
        peer.send("36.8");
        peer.disconnect();

        RelaySession::new("room-1").run(transport, &bus).await;

        assert_eq!(observer.recv().await.as_deref(), Some("36.6"));
        assert_eq!(observer.recv().await.as_deref(), Some("36.8"));
    }

    #[tokio::test]
    async fn surviving_session_keeps_receiving_after_peer_session_ends() {
        let bus = ChannelBus::new(16);

        let (transport1, mut peer1) = mock::pair();
        let (transport2, mut peer2) = mock::pair();

        let bus1 = bus.clone();
        let s1 = tokio::spawn(async move {
            RelaySession::new("room-1").run(transport1, &bus1).await;
        });
        let bus2 = bus.clone();
        let s2 = tokio::spawn(async move {
            RelaySession::new("room-1").run(transport2, &bus2).await;
        });

        while bus.subscriber_count("room-1") < 2 {
            tokio::task::yield_now().await;
        }

        bus.publish("room-1", "36.6");
        assert_eq!(peer2.from_relay.recv().await.as_deref(), Some("36.6"));

        // First viewer drops mid-stream; the second keeps receiving.
        peer1.disconnect();
        let _ = s1.await;
        assert_eq!(bus.subscriber_count("room-1"), 1);

        bus.publish("room-1", "36.8");
        assert_eq!(peer2.from_relay.recv().await.as_deref(), Some("36.8"));

        peer2.disconnect();
        let _ = s2.await;
        assert_eq!(bus.subscriber_count("room-1"), 0);
    }

    #[tokio::test]
    async fn frames_from_one_channel_never_cross_to_another() {
        let bus = ChannelBus::new(16);
        let (transport, mut peer) = mock::pair();

        let bus_for_session = bus.clone();
        let session = tokio::spawn(async move {
            RelaySession::new("room-1").run(transport, &bus_for_session).await;
        });
        while bus.subscriber_count("room-1") == 0 {
            tokio::task::yield_now().await;
        }

        bus.publish("room-2", "other");
        bus.publish("room-1", "mine");

        assert_eq!(peer.from_relay.recv().await.as_deref(), Some("mine"));
        peer.disconnect();
        let _ = session.await;
    }

    #[tokio::test]
    #[should_panic(expected = "illegal session transition")]
    async fn rerunning_a_closed_session_is_a_lifecycle_bug() {
        let bus = ChannelBus::new(16);
        let (transport1, mut peer1) = mock::pair();
        let (transport2, _peer2) = mock::pair();

        let mut session = RelaySession::new("room-1");
        peer1.disconnect();
        session.run(transport1, &bus).await;
        assert_eq!(session.state(), SessionState::Closed);

        session.run(transport2, &bus).await;
    }
}
