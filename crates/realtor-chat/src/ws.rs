//! WebSocket transport over `tokio-tungstenite`.
//!
//! Each [`WebSocketConnector::open`] validates the address synchronously and
//! spawns one task that performs the handshake and then multiplexes outbound
//! frames and inbound messages with `tokio::select!`. Everything the socket
//! does is reported as [`TransportSignal`]s; the task always finishes with
//! exactly one [`TransportSignal::Closed`].

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace, warn};
use url::Url;

use crate::errors::TransportError;
use crate::transport::{
    ConnectionId, Connector, EventSender, Transport, TransportEvent, TransportSignal,
};

/// How long a requested close waits for the gateway's close frame.
pub const CLOSE_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens real WebSocket connections on the current tokio runtime.
#[derive(Clone, Debug)]
pub struct WebSocketConnector {
    close_timeout: Duration,
}

impl Default for WebSocketConnector {
    fn default() -> Self {
        Self {
            close_timeout: CLOSE_HANDSHAKE_TIMEOUT,
        }
    }
}

impl WebSocketConnector {
    /// Create a connector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how long a close waits for the peer before giving up.
    #[must_use]
    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }
}

/// Frames queued for the socket task.
#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Handle to a socket task.
#[derive(Debug)]
pub struct WebSocketTransport {
    id: ConnectionId,
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl WebSocketTransport {
    /// Connection this transport belongs to.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Transport for WebSocketTransport {
    fn send(&self, payload: String) -> Result<(), TransportError> {
        self.outbound
            .send(Outbound::Text(payload))
            .map_err(|_| TransportError::NotRunning)
    }

    fn close(&self) {
        let _ = self.outbound.send(Outbound::Close);
    }
}

impl Connector for WebSocketConnector {
    type Transport = WebSocketTransport;

    fn open(
        &mut self,
        id: ConnectionId,
        url: &str,
        events: EventSender,
    ) -> Result<WebSocketTransport, TransportError> {
        let parsed = validate_url(url)?;
        let handle = Handle::try_current().map_err(|_| TransportError::NoRuntime)?;

        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        drop(handle.spawn(drive_socket(
            id,
            parsed,
            events,
            outbound_rx,
            self.close_timeout,
        )));
        Ok(WebSocketTransport { id, outbound })
    }
}

/// Accept only `ws://` and `wss://` addresses.
fn validate_url(url: &str) -> Result<Url, TransportError> {
    let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(parsed),
        other => Err(TransportError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

async fn drive_socket(
    id: ConnectionId,
    url: Url,
    events: EventSender,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    close_timeout: Duration,
) {
    let emit = |signal: TransportSignal| {
        let _ = events.send(TransportEvent::new(id, signal));
    };

    let ws = match connect_async(url.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            debug!(connection = %id, error = %e, "websocket handshake failed");
            emit(TransportSignal::Error(e.to_string()));
            emit(TransportSignal::Closed {
                code: None,
                reason: String::new(),
            });
            return;
        }
    };
    emit(TransportSignal::Opened);

    let (mut ws_tx, mut ws_rx) = ws.split();
    let mut accepting = true;
    let mut close_deadline = Instant::now();

    let (code, reason) = loop {
        tokio::select! {
            cmd = outbound_rx.recv(), if accepting => {
                match cmd {
                    Some(Outbound::Text(payload)) => {
                        if let Err(e) = ws_tx.send(Message::Text(payload.into())).await {
                            emit(TransportSignal::Error(e.to_string()));
                            break (None, String::new());
                        }
                    }
                    // Close requested or handle dropped: start the closing
                    // handshake and keep reading until the peer answers or
                    // the deadline passes.
                    Some(Outbound::Close) | None => {
                        accepting = false;
                        close_deadline = Instant::now() + close_timeout;
                        if ws_tx.send(Message::Close(None)).await.is_err() {
                            break (None, String::new());
                        }
                    }
                }
            }
            () = tokio::time::sleep_until(close_deadline), if !accepting => {
                warn!(connection = %id, ?close_timeout, "gateway did not answer close, dropping socket");
                break (None, String::new());
            }
            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        emit(TransportSignal::Message(text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Close(frame))) => {
                        break frame.map_or((None, String::new()), |f| {
                            (Some(u16::from(f.code)), f.reason.as_str().to_owned())
                        });
                    }
                    Some(Ok(other)) => {
                        trace!(connection = %id, kind = ?other, "ignoring non-text frame");
                    }
                    Some(Err(e)) => {
                        emit(TransportSignal::Error(e.to_string()));
                        break (None, String::new());
                    }
                    None => break (None, String::new()),
                }
            }
        }
    };

    debug!(connection = %id, ?code, "websocket task finished");
    emit(TransportSignal::Closed { code, reason });
}
