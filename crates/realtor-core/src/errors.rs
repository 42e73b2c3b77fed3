//! Storage error types.

use thiserror::Error;

/// Errors raised by [`KeyValueStore`](crate::store::KeyValueStore) backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the backing file.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file does not hold a JSON object of strings.
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
