//! Package-level constants.

/// Current version of the realtor widgets (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "realtor";

/// Name of the per-user data directory under `$HOME`.
pub const DATA_DIR: &str = ".realtor";
