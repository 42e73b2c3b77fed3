//! Chat widget error types.
//!
//! Transport and protocol failures never escape the
//! [`ConnectionManager`](crate::ConnectionManager): it turns them into bot
//! messages in the transcript. [`ChatError`] covers setup failures reported
//! to whoever wires the widget up.

use thiserror::Error;

/// Failures of the bidirectional channel to the gateway.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The gateway address cannot be used to open a WebSocket.
    #[error("invalid gateway URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected address.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No async runtime is available to drive the socket.
    #[error("no tokio runtime available to drive the transport")]
    NoRuntime,

    /// The socket task has already finished; the payload was not queued.
    #[error("transport is no longer running")]
    NotRunning,
}

/// Envelope encoding/decoding failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An inbound payload is not a valid envelope.
    #[error("malformed gateway payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// An outbound envelope could not be serialized.
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors raised while assembling a chat widget.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The session key could not be read from the store.
    #[error("session store error: {0}")]
    Store(#[from] realtor_core::StoreError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display() {
        let err = TransportError::InvalidUrl {
            url: "ftp://x".into(),
            reason: "unsupported scheme".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid gateway URL 'ftp://x': unsupported scheme"
        );
    }

    #[test]
    fn malformed_display_includes_cause() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ProtocolError::Malformed(json_err);
        assert!(err.to_string().starts_with("malformed gateway payload:"));
    }

    #[test]
    fn chat_error_from_store() {
        let store_err = realtor_core::StoreError::Io(std::io::Error::other("disk"));
        let err: ChatError = store_err.into();
        assert!(matches!(err, ChatError::Store(_)));
        assert_eq!(err.to_string(), "session store error: store I/O error: disk");
    }
}
