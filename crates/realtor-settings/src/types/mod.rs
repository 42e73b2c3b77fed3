//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON file
//! format. Each type implements [`Default`] with production default values
//! and is marked `#[serde(default)]`, so partial JSON is accepted and missing
//! fields keep their default.

mod chat;
mod leads;

pub use chat::*;
pub use leads::*;

use std::path::PathBuf;

use realtor_core::logging::LogFormat;
use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// # JSON Format
///
/// ```json
/// {
///   "chat": { "gatewayUrl": "wss://gateway.example.com" },
///   "leads": { "limit": 50 },
///   "logging": { "level": "info" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealtorSettings {
    /// Chat widget settings.
    pub chat: ChatSettings,
    /// Lead dashboard settings.
    pub leads: LeadsSettings,
    /// Local key-value store settings.
    pub store: StoreSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Local key-value store settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Path of the JSON state file. A leading `~/` expands to `$HOME`.
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: format!("~/{}/state.json", realtor_core::constants::DATA_DIR),
        }
    }
}

impl StoreSettings {
    /// The store path with `~/` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

pub(crate) fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}
