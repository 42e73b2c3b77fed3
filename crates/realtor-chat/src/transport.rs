//! Transport seam between the connection manager and the network.
//!
//! A [`Connector`] opens one [`Transport`] per connection attempt. The
//! transport reports its lifecycle asynchronously as [`TransportEvent`]s on
//! an unbounded channel; the event loop feeds them back into the
//! [`ConnectionManager`](crate::ConnectionManager). Each event carries the
//! [`ConnectionId`] it belongs to so late events from a replaced connection
//! can be recognised and dropped.

use std::fmt;

use tokio::sync::mpsc;

use crate::errors::TransportError;

/// Identifies one connection attempt within a manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn_{}", self.0)
    }
}

/// What happened on a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportSignal {
    /// The handshake completed; the channel can carry messages.
    Opened,
    /// A text frame arrived.
    Message(String),
    /// The channel failed. A [`TransportSignal::Closed`] follows.
    Error(String),
    /// The channel ended. No further events follow for this connection.
    Closed {
        /// Close code sent by the peer, if any.
        code: Option<u16>,
        /// Close reason sent by the peer (may be empty).
        reason: String,
    },
}

/// A signal tagged with the connection it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportEvent {
    /// Originating connection.
    pub connection: ConnectionId,
    /// What happened.
    pub signal: TransportSignal,
}

impl TransportEvent {
    /// Tag `signal` with `connection`.
    pub fn new(connection: ConnectionId, signal: TransportSignal) -> Self {
        Self { connection, signal }
    }
}

/// Sending half of the transport event channel.
pub type EventSender = mpsc::UnboundedSender<TransportEvent>;

/// Receiving half of the transport event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<TransportEvent>;

/// Create a transport event channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// A live bidirectional channel to the gateway.
pub trait Transport: Send {
    /// Queue a text frame. Returns immediately; delivery is asynchronous.
    fn send(&self, payload: String) -> Result<(), TransportError>;

    /// Ask the channel to close. A [`TransportSignal::Closed`] follows.
    fn close(&self);
}

/// Factory for transports.
pub trait Connector: Send {
    /// Transport type produced by this connector.
    type Transport: Transport;

    /// Start opening a channel to `url`.
    ///
    /// An `Err` means the transport could not even be constructed and no
    /// events will be emitted for `id`. On `Ok`, the outcome of the
    /// handshake arrives later on `events`.
    fn open(
        &mut self,
        id: ConnectionId,
        url: &str,
        events: EventSender,
    ) -> Result<Self::Transport, TransportError>;
}
