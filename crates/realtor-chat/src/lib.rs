//! # realtor-chat
//!
//! Chat widget for the realtor site: a single long-lived WebSocket channel to
//! the messaging gateway and the two-party transcript it feeds.
//!
//! Components, leaves first:
//!
//! - [`identity`]: stable per-visitor [`SessionKey`](realtor_core::SessionKey)
//! - [`gateway`]: resolves the gateway address (override or default)
//! - [`protocol`]: outbound/inbound envelope codec
//! - [`transport`]: the [`Connector`]/[`Transport`] seam and its events
//! - [`ws`]: `tokio-tungstenite` implementation of the transport
//! - [`connection`]: the [`ConnectionManager`] state machine
//! - [`transcript`]: append-only, auto-scrolling conversation log
//! - [`widget`]: UI controller mapping user actions onto the manager
//! - [`runtime`]: single-task event loop driving the widget
//!
//! All state transitions happen on one logical task: transport events and
//! user actions are fed to the widget one at a time by [`runtime::run_widget`].

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod gateway;
pub mod identity;
pub mod protocol;
pub mod runtime;
pub mod transcript;
pub mod transport;
pub mod widget;
pub mod ws;

pub use connection::{ConnectionConfig, ConnectionManager, ConnectionState, SendOutcome};
pub use errors::{ChatError, ProtocolError, TransportError};
pub use gateway::GatewayLocator;
pub use protocol::{InboundEnvelope, OutboundEnvelope};
pub use transcript::{ChatMessage, ChatRole, Transcript, TranscriptView};
pub use transport::{ConnectionId, Connector, Transport, TransportEvent, TransportSignal};
pub use widget::{ChatWidget, KeyPress, SubmitOutcome};
pub use ws::WebSocketConnector;
