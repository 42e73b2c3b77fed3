//! Settings error types.
//!
//! A missing settings file is not an error (defaults apply); only a file that
//! exists but cannot be read or understood is.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not JSON.
    #[error("settings file {} is not valid JSON: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The merged settings do not fit the settings schema (e.g. a string
    /// where a number belongs).
    #[error("settings have the wrong shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
