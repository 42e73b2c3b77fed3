//! Gateway envelope codec.
//!
//! Outbound: `{"type":"chat.send","sessionKey":"…","message":"…"}`
//!
//! Inbound: `{"type":"chat","text":"…"}` or `{"type":"error","message":"…"}`.
//! Envelopes with any other `type` decode to [`InboundEnvelope::Other`] and
//! are ignored by the connection manager.

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// Envelope sent to the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundEnvelope {
    /// A user chat message.
    #[serde(rename = "chat.send", rename_all = "camelCase")]
    ChatSend {
        /// Session key threading the conversation.
        session_key: String,
        /// Trimmed message text.
        message: String,
    },
}

impl OutboundEnvelope {
    /// Build a `chat.send` envelope.
    pub fn chat_send(session_key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChatSend {
            session_key: session_key.into(),
            message: message.into(),
        }
    }

    /// Serialize to the JSON text frame sent over the transport.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

/// Envelope received from the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundEnvelope {
    /// A bot reply.
    #[serde(rename = "chat")]
    Chat {
        /// Reply text.
        text: String,
    },
    /// A gateway-side failure.
    #[serde(rename = "error")]
    Error {
        /// Failure description.
        message: String,
    },
    /// Any other envelope type (typing indicators, acks, ...).
    #[serde(other)]
    Other,
}

/// Decode one inbound text frame.
pub fn decode_inbound(payload: &str) -> Result<InboundEnvelope, ProtocolError> {
    serde_json::from_str(payload).map_err(ProtocolError::Malformed)
}
