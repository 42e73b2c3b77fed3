//! # realtor-core
//!
//! Foundation types shared by the realtor chat widget and lead dashboard.
//!
//! - **Branded IDs**: [`SessionKey`] newtype for the visitor's chat session
//! - **Storage**: [`KeyValueStore`] trait with in-memory and JSON-file backends,
//!   standing in for the browser's local storage
//! - **Errors**: [`StoreError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` subscriber

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod store;

pub use errors::{Result, StoreError};
pub use ids::SessionKey;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
