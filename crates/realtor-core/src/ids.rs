//! Branded ID newtypes.
//!
//! The chat gateway keys conversations by an opaque session key. It is a
//! newtype around `String` so it cannot be confused with message text or a
//! connection address at call sites.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Opaque identifier of one visitor's chat session.
///
/// Generated once as `<prefix><unix millis>` and then read back from
/// storage on every connection attempt. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Generate a fresh key from `prefix` and the current timestamp.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        Self::generate_at(prefix, Utc::now().timestamp_millis())
    }

    /// Generate a key from `prefix` and an explicit millisecond timestamp.
    #[must_use]
    pub fn generate_at(prefix: &str, unix_millis: i64) -> Self {
        Self(format!("{prefix}{unix_millis}"))
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::ops::Deref for SessionKey {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}
