//! Lead dashboard error types.
//!
//! The `Display` text of each variant is what the dashboard shows in its
//! error notice, so the wording is user-facing.

use thiserror::Error;

/// Errors raised while loading leads.
#[derive(Debug, Error)]
pub enum LeadsError {
    /// The API key field was empty.
    #[error("Please enter your HubSpot API key")]
    MissingCredential,

    /// The CRM rejected the API key (HTTP 401).
    #[error("Invalid API key. Please check and try again.")]
    InvalidCredential,

    /// The CRM answered with any other non-success status.
    #[error("API error: {status}")]
    Api {
        /// HTTP status code.
        status: u16,
    },

    /// The request never got an answer.
    #[error("Network error: {0}")]
    Http(#[source] reqwest::Error),

    /// The CRM answered 2xx with a body that is not a contact listing.
    #[error("Unreadable CRM response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The API key could not be saved or restored.
    #[error("Storage error: {0}")]
    Store(#[from] realtor_core::StoreError),
}

/// Result type for lead dashboard operations.
pub type Result<T> = std::result::Result<T, LeadsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
