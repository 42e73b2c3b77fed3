//! Session identity provider.
//!
//! The gateway threads a conversation through an opaque session key that must
//! survive restarts. The key is created lazily the first time it is needed and
//! persisted in the [`KeyValueStore`]; afterwards it is only ever read.

use realtor_core::{KeyValueStore, SessionKey};
use tracing::{info, warn};

use crate::errors::ChatError;

/// Return the stored session key, creating and persisting one if absent.
///
/// A fresh key is `<prefix><unix millis>`. If persisting it fails the key is
/// still returned, so the chat works for this run and a new key is minted on
/// the next one.
pub fn resolve_session_key(
    store: &dyn KeyValueStore,
    key_name: &str,
    prefix: &str,
) -> Result<SessionKey, ChatError> {
    if let Some(existing) = store.get(key_name)?.filter(|v| !v.is_empty()) {
        return Ok(SessionKey::from(existing));
    }

    let key = SessionKey::generate(prefix);
    match store.set(key_name, key.as_str()) {
        Ok(()) => info!(session_key = %key, "created chat session key"),
        Err(e) => warn!(error = %e, "failed to persist chat session key"),
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use realtor_core::{MemoryStore, StoreError};

    use super::*;

    const KEY: &str = "realtor_session_key";

    #[test]
    fn reuses_stored_key() {
        let store = MemoryStore::with_entries([(KEY, "realtor-demo-42")]);
        let key = resolve_session_key(&store, KEY, "realtor-demo-").unwrap();
        assert_eq!(key.as_str(), "realtor-demo-42");
    }

    #[test]
    fn creates_and_persists_when_absent() {
        let store = MemoryStore::new();
        let key = resolve_session_key(&store, KEY, "realtor-demo-").unwrap();
        assert!(key.starts_with("realtor-demo-"));
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some(key.as_str()));
    }

    #[test]
    fn stable_across_calls() {
        let store = MemoryStore::new();
        let first = resolve_session_key(&store, KEY, "p-").unwrap();
        let second = resolve_session_key(&store, KEY, "p-").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_stored_value_is_replaced() {
        let store = MemoryStore::with_entries([(KEY, "")]);
        let key = resolve_session_key(&store, KEY, "p-").unwrap();
        assert!(key.starts_with("p-"));
    }

    struct ReadOnlyStore {
        writes: AtomicUsize,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> realtor_core::Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> realtor_core::Result<()> {
            let _ = self.writes.fetch_add(1, Ordering::Relaxed);
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
        fn remove(&self, _key: &str) -> realtor_core::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn persist_failure_still_returns_key() {
        let store = ReadOnlyStore {
            writes: AtomicUsize::new(0),
        };
        let key = resolve_session_key(&store, KEY, "p-").unwrap();
        assert!(key.starts_with("p-"));
        assert_eq!(store.writes.load(Ordering::Relaxed), 1);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> realtor_core::Result<Option<String>> {
            Err(StoreError::Io(std::io::Error::other("unreadable")))
        }
        fn set(&self, _key: &str, _value: &str) -> realtor_core::Result<()> {
            Ok(())
        }
        fn remove(&self, _key: &str) -> realtor_core::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn read_failure_is_reported() {
        let err = resolve_session_key(&BrokenStore, KEY, "p-").unwrap_err();
        assert!(matches!(err, ChatError::Store(_)));
    }
}
