//! Per-channel broadcast bus for live telemetry.
//!
//! [`ChannelBus`] routes opaque text messages between publishers and
//! subscribers by channel name. Every relay session subscribes to exactly
//! one channel; REST handlers publish readings into the same channels.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

/// Shared channel table. Each entry is the send side of a bounded
/// `tokio::broadcast` ring buffer.
type ChannelMap = HashMap<String, broadcast::Sender<String>>;

/// Publish/subscribe broker keyed by opaque channel name.
///
/// Channels are created implicitly on first subscribe and removed when the
/// last [`Subscription`] is released. Messages are opaque UTF-8 strings;
/// interpretation is the producer's and consumer's business.
///
/// # Delivery
///
/// Per-publisher order is preserved within a channel. Delivery is
/// best-effort: each subscriber has a bounded queue (the configured
/// capacity) and a subscriber that falls behind loses the oldest messages
/// rather than stalling the channel.
#[derive(Debug, Clone)]
pub struct ChannelBus {
    channels: Arc<Mutex<ChannelMap>>,
    capacity: usize,
}

impl ChannelBus {
    /// Creates a bus whose subscribers each buffer up to `capacity` messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    /// Publishes a message to every current subscriber of `channel`.
    ///
    /// Returns the number of subscribers that will receive the message.
    /// Publishing to a channel with no subscribers is a silent no-op and
    /// returns 0.
    pub fn publish(&self, channel: &str, message: impl Into<String>) -> usize {
        // Clone the sender out so the map lock is not held across delivery.
        let sender = lock_channels(&self.channels).get(channel).cloned();
        match sender {
            Some(tx) => tx.send(message.into()).unwrap_or(0),
            None => 0,
        }
    }

    /// Registers a new subscriber for `channel`, creating the channel if it
    /// does not exist yet.
    ///
    /// The returned handle yields messages published from this moment
    /// onward; there is no backlog replay. Releasing the handle (explicitly
    /// or by drop on any exit path) deregisters the subscriber.
    #[must_use]
    pub fn subscribe(&self, channel: &str) -> Subscription {
        let mut map = lock_channels(&self.channels);
        let tx = map
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        let rx = tx.subscribe();
        drop(map);

        Subscription {
            channel: channel.to_string(),
            rx,
            channels: Arc::clone(&self.channels),
        }
    }

    /// Returns the number of active subscribers on `channel`.
    #[must_use]
    pub fn subscriber_count(&self, channel: &str) -> usize {
        lock_channels(&self.channels)
            .get(channel)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Returns the number of channels that currently have subscribers.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        lock_channels(&self.channels).len()
    }
}

/// Locks the channel map, recovering from a poisoned lock.
fn lock_channels(channels: &Mutex<ChannelMap>) -> MutexGuard<'_, ChannelMap> {
    channels.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Live subscription to one channel.
///
/// Dropping the handle deregisters the subscriber; when the last subscriber
/// of a channel leaves, the channel itself is removed from the bus.
#[derive(Debug)]
pub struct Subscription {
    channel: String,
    rx: broadcast::Receiver<String>,
    channels: Arc<Mutex<ChannelMap>>,
}

impl Subscription {
    /// The channel this subscription is bound to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Waits for the next message on the channel.
    ///
    /// Returns `None` once the channel has been torn down on the bus side.
    /// A subscriber that lagged past its queue capacity skips the dropped
    /// messages and keeps receiving from the oldest retained one.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(dropped)) => {
                    tracing::warn!(
                        channel = %self.channel,
                        dropped,
                        "slow subscriber, oldest messages dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Releases the subscription.
    ///
    /// Consuming `self` makes a double release unrepresentable; the actual
    /// deregistration happens in [`Drop`], which also covers early returns
    /// and task cancellation.
    pub fn close(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut map = lock_channels(&self.channels);
        if let Some(tx) = map.get(&self.channel) {
            // Our receiver is still alive here, so a count of 1 means we
            // are the last subscriber and the channel can be collected.
            if tx.receiver_count() <= 1 {
                map.remove(&self.channel);
                tracing::debug!(channel = %self.channel, "channel collected");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = ChannelBus::new(16);
        assert_eq!(bus.publish("room-1", "36.6"), 0);
        assert_eq!(bus.channel_count(), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_in_publish_order() {
        let bus = ChannelBus::new(16);
        let mut sub = bus.subscribe("room-1");

        bus.publish("room-1", "36.6");
        bus.publish("room-1", "36.8");

        assert_eq!(sub.recv().await.as_deref(), Some("36.6"));
        assert_eq!(sub.recv().await.as_deref(), Some("36.8"));
    }

    #[tokio::test]
    async fn fan_out_reaches_every_subscriber() {
        let bus = ChannelBus::new(16);
        let mut s1 = bus.subscribe("room-1");
        let mut s2 = bus.subscribe("room-1");

        let delivered = bus.publish("room-1", "alert");
        assert_eq!(delivered, 2);

        assert_eq!(s1.recv().await.as_deref(), Some("alert"));
        assert_eq!(s2.recv().await.as_deref(), Some("alert"));
    }

    #[tokio::test]
    async fn channels_are_isolated() {
        let bus = ChannelBus::new(16);
        let mut s1 = bus.subscribe("room-1");
        let _s2 = bus.subscribe("room-2");

        bus.publish("room-2", "other");
        bus.publish("room-1", "mine");

        // The only message room-1 ever sees is its own.
        assert_eq!(s1.recv().await.as_deref(), Some("mine"));
    }

    #[tokio::test]
    async fn remaining_subscriber_survives_peer_disconnect() {
        let bus = ChannelBus::new(16);
        let mut s1 = bus.subscribe("room-1");
        let s2 = bus.subscribe("room-1");

        bus.publish("room-1", "36.6");
        assert_eq!(s1.recv().await.as_deref(), Some("36.6"));

        s2.close();
        bus.publish("room-1", "36.8");
        assert_eq!(s1.recv().await.as_deref(), Some("36.8"));
    }

    #[test]
    fn last_release_collects_channel() {
        let bus = ChannelBus::new(16);
        let s1 = bus.subscribe("room-1");
        let s2 = bus.subscribe("room-1");
        assert_eq!(bus.subscriber_count("room-1"), 2);
        assert_eq!(bus.channel_count(), 1);

        drop(s1);
        assert_eq!(bus.subscriber_count("room-1"), 1);
        assert_eq!(bus.channel_count(), 1);

        s2.close();
        assert_eq!(bus.subscriber_count("room-1"), 0);
        assert_eq!(bus.channel_count(), 0);
    }

    #[tokio::test]
    async fn lagged_subscriber_drops_oldest_and_continues() {
        let bus = ChannelBus::new(2);
        let mut sub = bus.subscribe("room-1");

        for i in 0..5 {
            bus.publish("room-1", format!("m{i}"));
        }

        // Queue capacity is 2, so only the newest two messages survive.
        assert_eq!(sub.recv().await.as_deref(), Some("m3"));
        assert_eq!(sub.recv().await.as_deref(), Some("m4"));
    }

    #[tokio::test]
    async fn no_backlog_replay_for_late_subscriber() {
        let bus = ChannelBus::new(16);
        let _anchor = bus.subscribe("room-1");
        bus.publish("room-1", "early");

        let mut late = bus.subscribe("room-1");
        bus.publish("room-1", "late");
        assert_eq!(late.recv().await.as_deref(), Some("late"));
    }
}
