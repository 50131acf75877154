//! Duplex message-framed transport abstraction for relay sessions.
//!
//! The relay core only needs four operations from its transport: read the
//! next text frame, write a text frame, close, and split into independent
//! read/write halves. [`WsTransport`] adapts `axum`'s WebSocket to this
//! interface; tests use an in-memory mock.

use std::future::Future;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};

/// Failure on the underlying transport.
///
/// Transport errors terminate the pump that observed them; they are
/// teardown signals, never escalated past the session.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Reading the next frame from the peer failed.
    #[error("transport read failed: {0}")]
    Read(String),
    /// Writing a frame to the peer failed.
    #[error("transport write failed: {0}")]
    Write(String),
}

/// A duplex, message-framed connection that can be split into halves.
pub trait RelayTransport: Send {
    /// Read half produced by [`split`](Self::split).
    type Reader: FrameReader;
    /// Write half produced by [`split`](Self::split).
    type Writer: FrameWriter;

    /// Splits the transport so both directions can be pumped concurrently.
    fn split(self) -> (Self::Reader, Self::Writer);
}

/// Read half of a relay transport.
pub trait FrameReader: Send {
    /// Waits for the next inbound text frame.
    ///
    /// `None` means the peer closed the connection; `Some(Err(_))` means
    /// the read failed. Either way the inbound pump terminates.
    fn next_frame(
        &mut self,
    ) -> impl Future<Output = Option<Result<String, TransportError>>> + Send;
}

/// Write half of a relay transport.
pub trait FrameWriter: Send {
    /// Sends one text frame to the peer.
    fn write_frame(
        &mut self,
        frame: String,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Closes the connection.
    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// [`RelayTransport`] over an accepted `axum` WebSocket.
pub struct WsTransport {
    socket: WebSocket,
}

impl WsTransport {
    /// Wraps an upgraded WebSocket.
    #[must_use]
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport").finish_non_exhaustive()
    }
}

impl RelayTransport for WsTransport {
    type Reader = WsFrameReader;
    type Writer = WsFrameWriter;

    fn split(self) -> (Self::Reader, Self::Writer) {
        let (sink, stream) = self.socket.split();
        (WsFrameReader { stream }, WsFrameWriter { sink })
    }
}

/// Read half of a WebSocket relay transport.
pub struct WsFrameReader {
    stream: SplitStream<WebSocket>,
}

impl std::fmt::Debug for WsFrameReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsFrameReader").finish_non_exhaustive()
    }
}

impl FrameReader for WsFrameReader {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Some(Ok(text.to_string())),
                Some(Ok(Message::Close(_))) | None => return None,
                // Binary, ping and pong frames are not relayed.
                Some(Ok(_)) => {}
                Some(Err(err)) => return Some(Err(TransportError::Read(err.to_string()))),
            }
        }
    }
}

/// Write half of a WebSocket relay transport.
pub struct WsFrameWriter {
    sink: SplitSink<WebSocket, Message>,
}

impl std::fmt::Debug for WsFrameWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsFrameWriter").finish_non_exhaustive()
    }
}

impl FrameWriter for WsFrameWriter {
    async fn write_frame(&mut self, frame: String) -> Result<(), TransportError> {
        self.sink
            .send(Message::text(frame))
            .await
            .map_err(|err| TransportError::Write(err.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.sink
            .close()
            .await
            .map_err(|err| TransportError::Write(err.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory transport for relay tests.

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::mpsc;

    use super::{FrameReader, FrameWriter, RelayTransport, TransportError};

    /// Test double standing in for one peer's connection.
    #[derive(Debug)]
    pub struct MockTransport {
        inbound: mpsc::UnboundedReceiver<Result<String, TransportError>>,
        outbound: mpsc::UnboundedSender<String>,
        closed: Arc<AtomicUsize>,
    }

    /// Driver side of a [`MockTransport`]: injects inbound frames and
    /// observes what the relay wrote and whether it closed.
    #[derive(Debug)]
    pub struct Peer {
        pub to_relay: mpsc::UnboundedSender<Result<String, TransportError>>,
        pub from_relay: mpsc::UnboundedReceiver<String>,
        closed: Arc<AtomicUsize>,
    }

    impl Peer {
        /// Sends a text frame into the relay's inbound direction.
        pub fn send(&self, frame: &str) {
            let _ = self.to_relay.send(Ok(frame.to_string()));
        }

        /// Simulates a connection drop on the read side.
        pub fn disconnect(&mut self) {
            let (dangling, _) = mpsc::unbounded_channel();
            self.to_relay = dangling;
        }

        /// How many times the relay closed the transport.
        pub fn close_count(&self) -> usize {
            self.closed.load(Ordering::SeqCst)
        }
    }

    /// Builds a connected mock transport and its driving peer.
    pub fn pair() -> (MockTransport, Peer) {
        let (to_relay, inbound) = mpsc::unbounded_channel();
        let (outbound, from_relay) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicUsize::new(0));
        (
            MockTransport {
                inbound,
                outbound,
                closed: Arc::clone(&closed),
            },
            Peer {
                to_relay,
                from_relay,
                closed,
            },
        )
    }

    #[derive(Debug)]
    pub struct MockReader {
        inbound: mpsc::UnboundedReceiver<Result<String, TransportError>>,
    }

    #[derive(Debug)]
    pub struct MockWriter {
        outbound: mpsc::UnboundedSender<String>,
        closed: Arc<AtomicUsize>,
    }

    impl RelayTransport for MockTransport {
        type Reader = MockReader;
        type Writer = MockWriter;

        fn split(self) -> (Self::Reader, Self::Writer) {
            (
                MockReader {
                    inbound: self.inbound,
                },
                MockWriter {
                    outbound: self.outbound,
                    closed: self.closed,
                },
            )
        }
    }

    impl FrameReader for MockReader {
        async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
            self.inbound.recv().await
        }
    }

    impl FrameWriter for MockWriter {
        async fn write_frame(&mut self, frame: String) -> Result<(), TransportError> {
            self.outbound
                .send(frame)
                .map_err(|_| TransportError::Write("peer receiver dropped".to_string()))
        }

        async fn close(&mut self) -> Result<(), TransportError> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
