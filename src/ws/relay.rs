//! Bidirectional pump between one transport and the channel bus.
//!
//! A relay runs two directions concurrently: inbound frames are published
//! to the bus, bus messages are written back out. The first direction to
//! terminate wins the race and cancels its sibling.

use crate::domain::{ChannelBus, Subscription};

use super::transport::{FrameReader, FrameWriter};

/// Which direction terminated a relay first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEnd {
    /// The peer closed or the read side failed.
    Inbound,
    /// The write side failed or the subscription ended.
    Outbound,
}

/// Relays between the transport halves and `channel` until either
/// direction terminates.
///
/// The losing pump is cancelled at its next suspension point and the
/// channel subscription is released before this function returns; the
/// caller keeps ownership of the halves and is responsible for closing
/// the transport.
pub async fn relay<R, W>(
    reader: &mut R,
    writer: &mut W,
    channel: &str,
    bus: &ChannelBus,
) -> RelayEnd
where
    R: FrameReader,
    W: FrameWriter,
{
    let mut subscription = bus.subscribe(channel);

    let end = tokio::select! {
        () = pump_inbound(reader, bus, channel) => RelayEnd::Inbound,
        () = pump_outbound(writer, &mut subscription) => RelayEnd::Outbound,
    };

    subscription.close();
    end
}

/// Reads frames from the peer and publishes them to the channel.
async fn pump_inbound<R: FrameReader>(reader: &mut R, bus: &ChannelBus, channel: &str) {
    while let Some(frame) = reader.next_frame().await {
        match frame {
            Ok(message) => {
                bus.publish(channel, message);
            }
            Err(err) => {
                tracing::debug!(channel, error = %err, "inbound pump stopped");
                return;
            }
        }
    }
}

/// Forwards channel messages to the peer.
async fn pump_outbound<W: FrameWriter>(writer: &mut W, subscription: &mut Subscription) {
    while let Some(message) = subscription.recv().await {
        if let Err(err) = writer.write_frame(message).await {
            tracing::debug!(channel = subscription.channel(), error = %err, "outbound pump stopped");
            return;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::transport::{RelayTransport, mock};
    use super::*;

    #[tokio::test]
    async fn inbound_frames_reach_the_channel() {
        let bus = ChannelBus::new(16);
        let mut observer = bus.subscribe("room-1");

        let (transport, mut peer) = mock::pair();
        let (mut reader, mut writer) = transport.split();

        peer.send("36.6");
        peer.send("36.8");
        peer.disconnect();

        let end = relay(&mut reader, &mut writer, "room-1", &bus).await;
        assert_eq!(end, RelayEnd::Inbound);
        assert_eq!(observer.recv().await.as_deref(), Some("36.6"));
        assert_eq!(observer.recv().await.as_deref(), Some("36.8"));
    }

    #[tokio::test]
    async fn channel_messages_reach_the_peer() {
        let bus = ChannelBus::new(16);
        let (transport, mut peer) = mock::pair();
        let (mut reader, mut writer) = transport.split();

        let bus_for_publisher = bus.clone();
        let publisher = tokio::spawn(async move {
            // Wait for the relay's subscription to exist before publishing.
            while bus_for_publisher.subscriber_count("room-1") == 0 {
                tokio::task::yield_now().await;
            }
            bus_for_publisher.publish("room-1", "36.6");
        });

        let relay_task = async {
            relay(&mut reader, &mut writer, "room-1", &bus).await;
        };

        tokio::select! {
            () = relay_task => panic!("relay should still be running"),
            frame = peer.from_relay.recv() => {
                assert_eq!(frame.as_deref(), Some("36.6"));
            }
        }
        let _ = publisher.await;
    }

    #[tokio::test]
    async fn subscription_is_released_on_inbound_close() {
        let bus = ChannelBus::new(16);
        let (transport, mut peer) = mock::pair();
        let (mut reader, mut writer) = transport.split();

        peer.disconnect();
        let end = relay(&mut reader, &mut writer, "room-1", &bus).await;

        assert_eq!(end, RelayEnd::Inbound);
        assert_eq!(bus.subscriber_count("room-1"), 0);
        assert_eq!(bus.channel_count(), 0);
    }

    #[tokio::test]
    async fn write_failure_terminates_the_relay() {
        let bus = ChannelBus::new(16);
        let (transport, peer) = mock::pair();
        let (mut reader, mut writer) = transport.split();

        // Peer stops reading: every write from now on fails.
        drop(peer.from_relay);

        let bus_for_publisher = bus.clone();
        tokio::spawn(async move {
            while bus_for_publisher.subscriber_count("room-1") == 0 {
                tokio::task::yield_now().await;
            }
            bus_for_publisher.publish("room-1", "36.6");
        });

        let end = relay(&mut reader, &mut writer, "room-1", &bus).await;
        assert_eq!(end, RelayEnd::Outbound);
        assert_eq!(bus.subscriber_count("room-1"), 0);
    }
}
