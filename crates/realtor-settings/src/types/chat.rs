//! Chat widget settings.

use serde::{Deserialize, Serialize};

/// Greeting shown when the gateway connection opens.
pub const DEFAULT_GREETING: &str =
    "Hi! I'm here to help you find the perfect home in Albuquerque. What brings you here today?";

/// Chat widget and gateway settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettings {
    /// Gateway address used when no override is given.
    pub gateway_url: String,
    /// Path appended to the gateway address for the WebSocket endpoint.
    pub gateway_path: String,
    /// Store key holding the visitor's session key.
    pub session_key_name: String,
    /// Prefix for freshly generated session keys.
    pub session_key_prefix: String,
    /// Bot message appended when the connection opens.
    pub greeting: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            gateway_url: "ws://localhost:18789".to_string(),
            gateway_path: "/ws".to_string(),
            session_key_name: "realtor_session_key".to_string(),
            session_key_prefix: "realtor-demo-".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}
