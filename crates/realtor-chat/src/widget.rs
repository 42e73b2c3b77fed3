//! UI controller for the chat widget.
//!
//! Maps user gestures (open, close, typing, submit) onto the
//! [`ConnectionManager`]. Holds the presentation state the manager does not
//! care about: visibility, the input buffer and input focus.

use realtor_core::KeyValueStore;
use realtor_settings::ChatSettings;
use tracing::debug;

use crate::connection::{ConnectionConfig, ConnectionManager, SendOutcome};
use crate::errors::ChatError;
use crate::gateway::GatewayLocator;
use crate::identity::resolve_session_key;
use crate::transcript::Transcript;
use crate::transport::{Connector, EventSender, TransportEvent};

/// A key press in the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Enter; with shift it inserts a newline instead of submitting.
    Enter {
        /// Whether shift was held.
        shift: bool,
    },
}

/// Result of submitting the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// Message handed to the open channel.
    Sent,
    /// Channel not open; a reconnect was started and the user asked to resend.
    Reconnecting,
}

impl From<SendOutcome> for SubmitOutcome {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Sent => Self::Sent,
            SendOutcome::Reconnecting => Self::Reconnecting,
            SendOutcome::Ignored => Self::Ignored,
        }
    }
}

/// The chat widget: a toggleable panel over one connection manager.
pub struct ChatWidget<C: Connector> {
    manager: ConnectionManager<C>,
    visible: bool,
    input: String,
    focused: bool,
}

impl<C: Connector> ChatWidget<C> {
    /// Wrap a manager. The widget starts hidden.
    pub fn new(manager: ConnectionManager<C>) -> Self {
        Self {
            manager,
            visible: false,
            input: String::new(),
            focused: false,
        }
    }

    /// Assemble a widget from settings: resolve the session key from `store`
    /// and the endpoint from `locator`.
    pub fn from_settings(
        settings: &ChatSettings,
        store: &dyn KeyValueStore,
        locator: &GatewayLocator,
        connector: C,
        events: EventSender,
        transcript: Transcript,
    ) -> Result<Self, ChatError> {
        let session_key = resolve_session_key(
            store,
            &settings.session_key_name,
            &settings.session_key_prefix,
        )?;
        let config = ConnectionConfig::new(locator.endpoint(), session_key)
            .with_greeting(settings.greeting.clone());
        Ok(Self::new(ConnectionManager::new(
            connector, config, events, transcript,
        )))
    }

    // ── Gestures ────────────────────────────────────────────────────

    /// Reveal the panel, focus the input and connect if not connected.
    pub fn open(&mut self) {
        self.visible = true;
        self.focused = true;
        let started = self.manager.connect();
        debug!(started, state = ?self.manager.state(), "chat widget opened");
    }

    /// Hide the panel. The connection stays up.
    pub fn close(&mut self) {
        self.visible = false;
        self.focused = false;
        debug!("chat widget closed");
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Apply one key press. Returns the submit outcome when the key submitted.
    pub fn key_press(&mut self, key: KeyPress) -> Option<SubmitOutcome> {
        match key {
            KeyPress::Char(c) => {
                self.input.push(c);
                None
            }
            KeyPress::Backspace => {
                let _ = self.input.pop();
                None
            }
            KeyPress::Enter { shift: true } => {
                self.input.push('\n');
                None
            }
            KeyPress::Enter { shift: false } => Some(self.submit()),
        }
    }

    /// Submit the input field.
    ///
    /// Blank input is ignored. Otherwise the user entry is appended, the field
    /// cleared (focus kept) and the text handed to the manager.
    pub fn submit(&mut self) -> SubmitOutcome {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let _ = self.manager.transcript_mut().push_user(text.clone());
        self.input.clear();
        self.focused = true;
        self.manager.send(&text).into()
    }

    /// Feed one transport event to the manager.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        self.manager.handle_event(event);
    }

    /// Close the connection. Only used when the host is going away.
    pub fn shutdown(&mut self) {
        self.manager.shutdown();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the input field has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The connection manager.
    pub fn manager(&self) -> &ConnectionManager<C> {
        &self.manager
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        self.manager.transcript()
    }
}
