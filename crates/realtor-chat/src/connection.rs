//! Connection manager: lifecycle of the one channel to the gateway.
//!
//! State machine:
//!
//! ```text
//!            connect()                Opened
//!   Idle ───────────────▶ Connecting ────────▶ Open
//!    ▲                      │   │               │
//!    │          construct   │   │ Error         │ Error
//!    │          failure     ▼   ▼               ▼
//!    └─── (first use) ─── Closed ◀──────────── Closed (handle kept until Closed signal)
//!                           │
//!                           └── connect() ──▶ Connecting
//! ```
//!
//! `Closed` is the post-connection resting state and, like `Idle`, accepts a
//! new `connect()` once the transport handle has been released by the
//! transport's own close signal. At most one transport handle exists at any
//! time. Transport and protocol failures never propagate to the caller: they
//! become bot messages in the transcript.

use realtor_core::SessionKey;
use realtor_settings::DEFAULT_GREETING;
use tracing::{debug, info, warn};

use crate::protocol::{InboundEnvelope, OutboundEnvelope, decode_inbound};
use crate::transcript::Transcript;
use crate::transport::{
    ConnectionId, Connector, EventSender, Transport, TransportEvent, TransportSignal,
};

/// Shown when the transport cannot even be constructed.
pub const CONNECT_FAILED_MESSAGE: &str = "❌ Failed to connect. Make sure the gateway is running.";

/// Shown when the transport reports a runtime error.
pub const CONNECTION_ERROR_MESSAGE: &str = "❌ Connection error. Please try again.";

/// Shown when a send finds no open channel; a reconnect is started.
pub const CONNECTION_LOST_MESSAGE: &str =
    "Connection lost. Reconnecting, please send your message again.";

/// Shown when the gateway sends something that is not an envelope.
pub const MALFORMED_REPLY_MESSAGE: &str = "❌ Received an unreadable reply from the gateway.";

/// Lifecycle state of the gateway connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected.
    Idle,
    /// Transport constructed, handshake pending. No timeout applies.
    Connecting,
    /// Ready to send and receive.
    Open,
    /// Transport failed or ended; eligible for a new attempt once released.
    Closed,
}

/// Result of [`ConnectionManager::send`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// One envelope was handed to the transport.
    Sent,
    /// No open channel: the user was told and a reconnect was started.
    Reconnecting,
    /// The text was empty after trimming; nothing happened.
    Ignored,
}

/// Static inputs of a connection manager.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Full WebSocket endpoint (gateway address plus path).
    pub endpoint: String,
    /// Session key stamped on every outbound envelope.
    pub session_key: SessionKey,
    /// Bot message appended when the channel opens.
    pub greeting: String,
}

impl ConnectionConfig {
    /// Config with the default greeting.
    pub fn new(endpoint: impl Into<String>, session_key: SessionKey) -> Self {
        Self {
            endpoint: endpoint.into(),
            session_key,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }

    /// Replace the greeting.
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

/// The live transport and the id its events carry.
struct Connection<T> {
    id: ConnectionId,
    transport: T,
}

/// Owns the single gateway connection and mirrors its traffic into the
/// transcript.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    config: ConnectionConfig,
    events: EventSender,
    state: ConnectionState,
    connection: Option<Connection<C::Transport>>,
    last_id: ConnectionId,
    awaiting_input: bool,
    connect_attempts: u64,
    transcript: Transcript,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create an idle manager. Transports report back on `events`.
    pub fn new(
        connector: C,
        config: ConnectionConfig,
        events: EventSender,
        transcript: Transcript,
    ) -> Self {
        Self {
            connector,
            config,
            events,
            state: ConnectionState::Idle,
            connection: None,
            last_id: ConnectionId::new(0),
            awaiting_input: false,
            connect_attempts: 0,
            transcript,
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether messages can be sent right now.
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Whether a handshake is in progress.
    pub fn is_connecting(&self) -> bool {
        self.state == ConnectionState::Connecting
    }

    /// Whether the widget is waiting for the visitor to type.
    pub fn awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    /// Id of the live transport, if one is held.
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(|c| c.id)
    }

    /// Whether a transport handle is held.
    pub fn has_transport(&self) -> bool {
        self.connection.is_some()
    }

    /// Number of transports this manager has tried to construct.
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access for the UI controller to append user entries.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Session key stamped on outbound envelopes.
    pub fn session_key(&self) -> &SessionKey {
        &self.config.session_key
    }

    /// Endpoint transports are opened against.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Start a connection attempt unless one is pending or a transport is held.
    ///
    /// Returns `true` if a new transport was constructed.
    pub fn connect(&mut self) -> bool {
        if self.state == ConnectionState::Connecting || self.connection.is_some() {
            debug!(state = ?self.state, "connect skipped, connection already present");
            return false;
        }

        let id = self.last_id.next();
        self.last_id = id;
        self.state = ConnectionState::Connecting;
        self.connect_attempts += 1;
        info!(connection = %id, endpoint = %self.config.endpoint, "connecting to gateway");

        match self
            .connector
            .open(id, &self.config.endpoint, self.events.clone())
        {
            Ok(transport) => {
                self.connection = Some(Connection { id, transport });
                true
            }
            Err(e) => {
                warn!(connection = %id, error = %e, "failed to construct transport");
                self.state = ConnectionState::Closed;
                let _ = self.transcript.push_bot(CONNECT_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Send a chat message, or start a reconnect if the channel is not open.
    ///
    /// Never fails: problems are reported in the transcript.
    pub fn send(&mut self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        if self.state == ConnectionState::Open {
            if let Some(conn) = self.connection.as_ref() {
                let envelope =
                    OutboundEnvelope::chat_send(self.config.session_key.as_str(), message);
                let delivered = envelope
                    .encode()
                    .map_err(|e| e.to_string())
                    .and_then(|payload| conn.transport.send(payload).map_err(|e| e.to_string()));
                match delivered {
                    Ok(()) => {
                        debug!(connection = %conn.id, chars = message.len(), "message sent");
                        self.awaiting_input = false;
                        return SendOutcome::Sent;
                    }
                    Err(e) => {
                        warn!(connection = %conn.id, error = %e, "send failed, channel unusable");
                        self.state = ConnectionState::Closed;
                    }
                }
            }
        }

        let _ = self.transcript.push_bot(CONNECTION_LOST_MESSAGE);
        let _ = self.connect();
        SendOutcome::Reconnecting
    }

    /// Ask the live transport to close. Used when the host process exits.
    pub fn shutdown(&mut self) {
        if let Some(conn) = self.connection.as_ref() {
            info!(connection = %conn.id, "closing gateway connection");
            conn.transport.close();
        }
    }

    // ── Transport events ────────────────────────────────────────────

    /// Apply one transport event. Events for any connection other than the
    /// live one are dropped.
    pub fn handle_event(&mut self, event: TransportEvent) {
        if self.connection_id() != Some(event.connection) {
            debug!(
                connection = %event.connection,
                signal = ?event.signal,
                "dropping event for stale connection"
            );
            return;
        }

        match event.signal {
            TransportSignal::Opened => self.on_open(event.connection),
            TransportSignal::Message(payload) => self.on_message(event.connection, &payload),
            TransportSignal::Error(reason) => self.on_error(event.connection, &reason),
            TransportSignal::Closed { code, reason } => {
                self.on_close(event.connection, code, &reason);
            }
        }
    }

    fn on_open(&mut self, id: ConnectionId) {
        if self.state != ConnectionState::Connecting {
            debug!(connection = %id, state = ?self.state, "ignoring open outside handshake");
            return;
        }
        info!(connection = %id, "gateway connection open");
        self.state = ConnectionState::Open;
        let _ = self.transcript.push_bot(self.config.greeting.clone());
        self.awaiting_input = true;
    }

    fn on_message(&mut self, id: ConnectionId, payload: &str) {
        match decode_inbound(payload) {
            Ok(InboundEnvelope::Chat { text }) => {
                let _ = self.transcript.push_bot(text);
                self.awaiting_input = true;
            }
            Ok(InboundEnvelope::Error { message }) => {
                warn!(connection = %id, %message, "gateway reported an error");
                let _ = self.transcript.push_bot(format!("Error: {message}"));
            }
            Ok(InboundEnvelope::Other) => {
                debug!(connection = %id, "ignoring unrecognised envelope type");
            }
            Err(e) => {
                warn!(connection = %id, error = %e, "malformed gateway payload");
                let _ = self.transcript.push_bot(MALFORMED_REPLY_MESSAGE);
            }
        }
    }

    fn on_error(&mut self, id: ConnectionId, reason: &str) {
        warn!(connection = %id, state = ?self.state, %reason, "gateway transport error");
        self.state = ConnectionState::Closed;
        let _ = self.transcript.push_bot(CONNECTION_ERROR_MESSAGE);
    }

    fn on_close(&mut self, id: ConnectionId, code: Option<u16>, reason: &str) {
        info!(connection = %id, ?code, %reason, "gateway connection closed");
        self.connection = None;
        self.state = ConnectionState::Closed;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use parking_lot::Mutex;

    use super::*;
    use crate::errors::TransportError;
    use crate::transport::{EventReceiver, event_channel};

    /// Everything the fake transports observed.
    #[derive(Debug, Default)]
    pub(crate) struct FakeLog {
        pub opened: Vec<(ConnectionId, String)>,
        pub sent: Vec<(ConnectionId, String)>,
        pub close_requests: Vec<ConnectionId>,
        pub fail_construction: bool,
        pub reject_sends: bool,
    }

    #[derive(Clone, Default)]
    pub(crate) struct FakeConnector {
        pub log: Arc<Mutex<FakeLog>>,
    }

    pub(crate) struct FakeTransport {
        id: ConnectionId,
        log: Arc<Mutex<FakeLog>>,
    }

    impl Transport for FakeTransport {
        fn send(&self, payload: String) -> Result<(), TransportError> {
            let mut log = self.log.lock();
            if log.reject_sends {
                return Err(TransportError::NotRunning);
            }
            log.sent.push((self.id, payload));
            Ok(())
        }

        fn close(&self) {
            self.log.lock().close_requests.push(self.id);
        }
    }

    impl Connector for FakeConnector {
        type Transport = FakeTransport;

        fn open(
            &mut self,
            id: ConnectionId,
            url: &str,
            _events: EventSender,
        ) -> Result<FakeTransport, TransportError> {
            let mut log = self.log.lock();
            if log.fail_construction {
                return Err(TransportError::InvalidUrl {
                    url: url.to_string(),
                    reason: "refused by test".into(),
                });
            }
            log.opened.push((id, url.to_string()));
            Ok(FakeTransport {
                id,
                log: self.log.clone(),
            })
        }
    }

    pub(crate) const ENDPOINT: &str = "ws://localhost:18789/ws";
    pub(crate) const SESSION: &str = "realtor-demo-1700000000000";

    pub(crate) fn manager() -> (ConnectionManager<FakeConnector>, Arc<Mutex<FakeLog>>, EventReceiver) {
        let connector = FakeConnector::default();
        let log = connector.log.clone();
        let (tx, rx) = event_channel();
        let config = ConnectionConfig::new(ENDPOINT, SessionKey::from(SESSION));
        let mgr = ConnectionManager::new(connector, config, tx, Transcript::new());
        (mgr, log, rx)
    }

    fn signal(mgr: &mut ConnectionManager<FakeConnector>, signal: TransportSignal) {
        let id = mgr.connection_id().expect("live connection");
        mgr.handle_event(TransportEvent::new(id, signal));
    }

    fn open(mgr: &mut ConnectionManager<FakeConnector>) {
        assert!(mgr.connect());
        signal(mgr, TransportSignal::Opened);
    }

    fn closed() -> TransportSignal {
        TransportSignal::Closed {
            code: Some(1000),
            reason: String::new(),
        }
    }

    // ── connect ─────────────────────────────────────────────────────

    #[test]
    fn starts_idle() {
        let (mgr, log, _rx) = manager();
        assert_eq!(mgr.state(), ConnectionState::Idle);
        assert!(!mgr.has_transport());
        assert!(!mgr.awaiting_input());
        assert!(mgr.transcript().is_empty());
        assert!(log.lock().opened.is_empty());
    }

    #[test]
    fn connect_opens_one_transport_at_endpoint() {
        let (mut mgr, log, _rx) = manager();
        assert!(mgr.connect());
        assert_eq!(mgr.state(), ConnectionState::Connecting);
        let log = log.lock();
        assert_eq!(log.opened.len(), 1);
        assert_eq!(log.opened[0].1, ENDPOINT);
    }

    #[test]
    fn connect_is_noop_while_connecting() {
        let (mut mgr, log, _rx) = manager();
        assert!(mgr.connect());
        assert!(!mgr.connect());
        assert!(!mgr.connect());
        assert_eq!(log.lock().opened.len(), 1);
        assert_eq!(mgr.connect_attempts(), 1);
    }

    #[test]
    fn connect_is_noop_while_open() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        assert!(!mgr.connect());
        assert_eq!(log.lock().opened.len(), 1);
        // no duplicate greeting
        assert_eq!(mgr.transcript().len(), 1);
    }

    #[test]
    fn construction_failure_is_reported_and_recoverable() {
        let (mut mgr, log, _rx) = manager();
        log.lock().fail_construction = true;
        assert!(!mgr.connect());
        assert_eq!(mgr.state(), ConnectionState::Closed);
        assert!(!mgr.is_connecting());
        assert!(!mgr.has_transport());
        assert_eq!(mgr.transcript().lines(), vec![format!("bot: {CONNECT_FAILED_MESSAGE}")]);

        log.lock().fail_construction = false;
        assert!(mgr.connect());
        assert_eq!(mgr.state(), ConnectionState::Connecting);
        assert_eq!(mgr.connect_attempts(), 2);
    }

    // ── open ────────────────────────────────────────────────────────

    #[test]
    fn open_greets_and_awaits_input() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        assert!(mgr.is_open());
        assert!(mgr.awaiting_input());
        assert_eq!(
            mgr.transcript().lines(),
            vec![format!("bot: {DEFAULT_GREETING}")]
        );
    }

    #[test]
    fn custom_greeting() {
        let connector = FakeConnector::default();
        let (tx, _rx) = event_channel();
        let config = ConnectionConfig::new(ENDPOINT, SessionKey::from(SESSION))
            .with_greeting("Welcome!");
        let mut mgr = ConnectionManager::new(connector, config, tx, Transcript::new());
        open(&mut mgr);
        assert_eq!(mgr.transcript().lines(), vec!["bot: Welcome!"]);
    }

    #[test]
    fn duplicate_open_signal_does_not_greet_twice() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        signal(&mut mgr, TransportSignal::Opened);
        assert_eq!(mgr.transcript().len(), 1);
    }

    // ── send ────────────────────────────────────────────────────────

    #[test]
    fn send_while_open_emits_exactly_one_envelope() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        assert_eq!(mgr.send("  3 bedrooms \n"), SendOutcome::Sent);

        let log = log.lock();
        assert_eq!(log.sent.len(), 1);
        assert_eq!(
            log.sent[0].1,
            format!(r#"{{"type":"chat.send","sessionKey":"{SESSION}","message":"3 bedrooms"}}"#)
        );
        // the manager itself adds nothing to the transcript on success
        assert_eq!(mgr.transcript().len(), 1);
        assert!(!mgr.awaiting_input());
    }

    #[test]
    fn send_empty_is_ignored() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        assert_eq!(mgr.send("   "), SendOutcome::Ignored);
        assert_eq!(mgr.send(""), SendOutcome::Ignored);
        assert!(log.lock().sent.is_empty());
        assert_eq!(mgr.transcript().len(), 1);
    }

    #[test]
    fn send_while_idle_reconnects_once() {
        let (mut mgr, log, _rx) = manager();
        assert_eq!(mgr.send("hello"), SendOutcome::Reconnecting);

        let log = log.lock();
        assert!(log.sent.is_empty());
        assert_eq!(log.opened.len(), 1);
        assert_eq!(mgr.transcript().lines(), vec![format!("bot: {CONNECTION_LOST_MESSAGE}")]);
        assert_eq!(mgr.state(), ConnectionState::Connecting);
    }

    #[test]
    fn send_while_connecting_does_not_open_second_transport() {
        let (mut mgr, log, _rx) = manager();
        assert!(mgr.connect());
        assert_eq!(mgr.send("hello"), SendOutcome::Reconnecting);
        assert_eq!(log.lock().opened.len(), 1);
        assert!(log.lock().sent.is_empty());
    }

    #[test]
    fn send_rejected_by_transport_falls_back_to_reconnect() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        log.lock().reject_sends = true;
        assert_eq!(mgr.send("hello"), SendOutcome::Reconnecting);
        assert_eq!(mgr.state(), ConnectionState::Closed);
        // the old handle is still held until the transport closes
        assert!(mgr.has_transport());
        assert_eq!(log.lock().opened.len(), 1);
        assert_eq!(
            mgr.transcript().last().unwrap().text,
            CONNECTION_LOST_MESSAGE
        );
    }

    // ── inbound messages ────────────────────────────────────────────

    #[test]
    fn chat_envelope_appends_bot_reply() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        let _ = mgr.send("hi");
        assert!(!mgr.awaiting_input());

        signal(
            &mut mgr,
            TransportSignal::Message(r#"{"type":"chat","text":"What is your budget?"}"#.into()),
        );
        assert_eq!(
            mgr.transcript().last().unwrap().to_string(),
            "bot: What is your budget?"
        );
        assert_eq!(mgr.transcript().len(), 2);
        assert!(mgr.awaiting_input());
    }

    #[test]
    fn error_envelope_appends_error_text() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        signal(
            &mut mgr,
            TransportSignal::Message(r#"{"type":"error","message":"agent unavailable"}"#.into()),
        );
        let last = mgr.transcript().last().unwrap();
        assert_eq!(last.text, "Error: agent unavailable");
        assert!(last.text.contains("agent unavailable"));
        assert!(mgr.is_open());
    }

    #[test]
    fn malformed_payload_is_reported_not_fatal() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        signal(&mut mgr, TransportSignal::Message("<html>502</html>".into()));
        assert_eq!(mgr.transcript().last().unwrap().text, MALFORMED_REPLY_MESSAGE);
        assert!(mgr.is_open());

        // still usable afterwards
        assert_eq!(mgr.send("still there?"), SendOutcome::Sent);
        assert_eq!(log.lock().sent.len(), 1);
    }

    #[test]
    fn unknown_envelope_type_is_ignored() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        signal(&mut mgr, TransportSignal::Message(r#"{"type":"typing"}"#.into()));
        assert_eq!(mgr.transcript().len(), 1);
    }

    // ── error / close ───────────────────────────────────────────────

    #[test]
    fn transport_error_reports_and_keeps_handle() {
        let (mut mgr, log, _rx) = manager();
        assert!(mgr.connect());
        signal(&mut mgr, TransportSignal::Error("connection refused".into()));

        assert!(!mgr.is_connecting());
        assert_eq!(mgr.state(), ConnectionState::Closed);
        assert!(mgr.has_transport());
        assert_eq!(
            mgr.transcript().lines(),
            vec![format!("bot: {CONNECTION_ERROR_MESSAGE}")]
        );
        // handle still held: no second transport yet
        assert!(!mgr.connect());
        assert_eq!(log.lock().opened.len(), 1);
    }

    #[test]
    fn close_releases_handle_and_allows_reconnect() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        signal(&mut mgr, closed());
        assert!(!mgr.has_transport());
        assert_eq!(mgr.state(), ConnectionState::Closed);
        assert_eq!(mgr.transcript().len(), 1);

        assert!(mgr.connect());
        assert_eq!(log.lock().opened.len(), 2);
    }

    #[test]
    fn error_then_close_then_reconnect() {
        let (mut mgr, log, _rx) = manager();
        assert!(mgr.connect());
        signal(&mut mgr, TransportSignal::Error("refused".into()));
        signal(&mut mgr, closed());
        assert!(!mgr.has_transport());
        assert_eq!(mgr.send("anyone?"), SendOutcome::Reconnecting);
        assert_eq!(log.lock().opened.len(), 2);
        assert_eq!(mgr.state(), ConnectionState::Connecting);
    }

    #[test]
    fn events_from_replaced_connection_are_dropped() {
        let (mut mgr, _log, _rx) = manager();
        open(&mut mgr);
        let old = mgr.connection_id().unwrap();
        signal(&mut mgr, closed());
        assert!(mgr.connect());
        let new = mgr.connection_id().unwrap();
        assert_ne!(old, new);

        let before = mgr.transcript().len();
        mgr.handle_event(TransportEvent::new(
            old,
            TransportSignal::Message(r#"{"type":"chat","text":"late"}"#.into()),
        ));
        mgr.handle_event(TransportEvent::new(old, closed()));
        assert_eq!(mgr.transcript().len(), before);
        assert_eq!(mgr.connection_id(), Some(new));
        assert!(mgr.is_connecting());
    }

    #[test]
    fn shutdown_requests_close_of_live_transport() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        let id = mgr.connection_id().unwrap();
        mgr.shutdown();
        assert_eq!(log.lock().close_requests, vec![id]);
        // released only when the close signal arrives
        assert!(mgr.has_transport());
        signal(&mut mgr, closed());
        assert!(!mgr.has_transport());
    }

    #[test]
    fn shutdown_without_transport_is_noop() {
        let (mut mgr, log, _rx) = manager();
        mgr.shutdown();
        assert!(log.lock().close_requests.is_empty());
    }

    #[test]
    fn never_more_than_one_live_transport() {
        let (mut mgr, log, _rx) = manager();
        let mut closes_delivered = 0usize;
        let live = |log: &Arc<Mutex<FakeLog>>, closes: usize| log.lock().opened.len() - closes;

        for round in 0..5 {
            let _ = mgr.connect();
            let _ = mgr.connect();
            assert!(live(&log, closes_delivered) <= 1);
            let _ = mgr.send("ping");
            assert!(live(&log, closes_delivered) <= 1);
            if round % 2 == 0 {
                signal(&mut mgr, TransportSignal::Opened);
                let _ = mgr.send("pong");
                signal(&mut mgr, TransportSignal::Error("reset".into()));
            }
            let _ = mgr.send("again");
            assert!(live(&log, closes_delivered) <= 1);
            signal(&mut mgr, closed());
            closes_delivered += 1;
            assert_eq!(live(&log, closes_delivered), 0);
        }
        assert_eq!(log.lock().opened.len(), 5);
    }

    #[test]
    fn scenario_close_then_send_reconnects_without_sending() {
        let (mut mgr, log, _rx) = manager();
        open(&mut mgr);
        signal(&mut mgr, closed());

        assert_matches!(mgr.send("hello"), SendOutcome::Reconnecting);
        let last = mgr.transcript().last().unwrap();
        assert!(last.text.starts_with("Connection lost"));
        assert!(mgr.is_connecting());
        assert!(log.lock().sent.is_empty());
    }
}
