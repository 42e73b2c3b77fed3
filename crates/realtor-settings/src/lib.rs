//! # realtor-settings
//!
//! Configuration management with layered sources for the realtor widgets.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`RealtorSettings::default()`]
//! 2. **User file**: `~/.realtor/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `REALTOR_*` overrides (highest priority)
//!
//! Settings are loaded once by the binary and passed down explicitly; there
//! is no global instance.
//!
//! # Usage
//!
//! ```no_run
//! use realtor_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("Gateway: {}", settings.chat.gateway_url);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
