//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`RealtorSettings::default()`]
//! 2. If `~/.realtor/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use realtor_core::logging::LogFormat;
use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{RealtorSettings, home_dir};

/// Resolve the path to the settings file (`~/.realtor/settings.json`).
pub fn settings_path() -> PathBuf {
    home_dir()
        .join(realtor_core::constants::DATA_DIR)
        .join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<RealtorSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<RealtorSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Defaults merged with the settings file, without env overrides.
fn load_file_layer(path: &Path) -> Result<RealtorSettings> {
    let defaults = serde_json::to_value(RealtorSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `REALTOR_*` environment variable overrides to loaded settings.
pub fn apply_env_overrides(settings: &mut RealtorSettings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// Each variable has strict parsing rules; invalid values are ignored with a
/// warning and the file/default value is kept.
pub fn apply_overrides<F>(settings: &mut RealtorSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Chat ────────────────────────────────────────────────────────
    if let Some(v) = read("REALTOR_GATEWAY") {
        settings.chat.gateway_url = v;
    }

    // ── Leads ───────────────────────────────────────────────────────
    if let Some(v) = read("REALTOR_CRM_BASE_URL") {
        settings.leads.api_base_url = v;
    }
    if let Some(v) = read("REALTOR_CONTACTS_LIMIT") {
        match parse_u32_range(&v, 1, 100) {
            Some(n) => settings.leads.limit = n,
            None => warn_invalid("REALTOR_CONTACTS_LIMIT", &v),
        }
    }

    // ── Store / logging ─────────────────────────────────────────────
    if let Some(v) = read("REALTOR_STORE_PATH") {
        settings.store.path = v;
    }
    if let Some(v) = read("REALTOR_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("REALTOR_LOG_FORMAT") {
        match LogFormat::parse(&v) {
            Some(format) => settings.logging.format = format,
            None => warn_invalid("REALTOR_LOG_FORMAT", &v),
        }
    }
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env override, ignoring");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "chat": {"gatewayUrl": "ws://a", "gatewayPath": "/ws"}
        });
        let source = serde_json::json!({
            "chat": {"gatewayUrl": "ws://b"}
        });
        let merged = deep_merge(target, source);
        assert_eq!(merged["chat"]["gatewayUrl"], "ws://b");
        assert_eq!(merged["chat"]["gatewayPath"], "/ws");
    }

    #[test]
    fn merge_null_in_user_file_keeps_default() {
        let defaults = serde_json::to_value(RealtorSettings::default()).unwrap();
        let user = serde_json::json!({"leads": {"limit": null}});
        let merged = deep_merge(defaults, user);
        assert_eq!(merged["leads"]["limit"], 100);
        assert_eq!(merged["chat"]["gatewayUrl"], "ws://localhost:18789");
    }

    #[test]
    fn merge_list_values_replace_wholesale() {
        let target = serde_json::json!({"leads": {"statuses": ["hot", "warm", "cold"]}});
        let source = serde_json::json!({"leads": {"statuses": ["hot"]}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["leads"]["statuses"], serde_json::json!(["hot"]));
    }

    #[test]
    fn merge_keeps_sections_the_defaults_lack() {
        let defaults = serde_json::to_value(RealtorSettings::default()).unwrap();
        let user = serde_json::json!({"widget": {"theme": "dark"}});
        let merged = deep_merge(defaults, user);
        assert_eq!(merged["widget"]["theme"], "dark");
        assert_eq!(merged["leads"]["limit"], 100);
    }

    #[test]
    fn merge_scalar_replaces_whole_section() {
        let defaults = serde_json::to_value(RealtorSettings::default()).unwrap();
        let user = serde_json::json!({"store": "/tmp/state.json"});
        let merged = deep_merge(defaults, user);
        assert_eq!(merged["store"], "/tmp/state.json");
        assert!(merged["chat"].is_object());
    }

    // ── file layer ──────────────────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_file_layer(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.chat.gateway_url, "ws://localhost:18789");
    }

    #[test]
    fn load_partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"chat": {"gatewayUrl": "wss://gw.example.com"}, "leads": {"limit": 10}}"#,
        )
        .unwrap();
        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.chat.gateway_url, "wss://gw.example.com");
        assert_eq!(settings.chat.session_key_name, "realtor_session_key");
        assert_eq!(settings.leads.limit, 10);
        assert_eq!(settings.leads.error_notice_ms, 5000);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_file_layer(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn load_wrong_shape_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"leads": {"limit": "lots"}}"#).unwrap();
        assert!(matches!(load_file_layer(&path), Err(SettingsError::Shape(_))));
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn overrides_apply_valid_values() {
        let mut settings = RealtorSettings::default();
        apply_overrides(
            &mut settings,
            lookup_from(&[
                ("REALTOR_GATEWAY", "wss://prod.example.com"),
                ("REALTOR_CRM_BASE_URL", "http://127.0.0.1:9999"),
                ("REALTOR_CONTACTS_LIMIT", "20"),
                ("REALTOR_STORE_PATH", "/tmp/realtor.json"),
                ("REALTOR_LOG_LEVEL", "debug"),
                ("REALTOR_LOG_FORMAT", "json"),
            ]),
        );
        assert_eq!(settings.chat.gateway_url, "wss://prod.example.com");
        assert_eq!(settings.leads.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(settings.leads.limit, 20);
        assert_eq!(settings.store.path, "/tmp/realtor.json");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn overrides_ignore_invalid_and_empty_values() {
        let mut settings = RealtorSettings::default();
        apply_overrides(
            &mut settings,
            lookup_from(&[
                ("REALTOR_GATEWAY", ""),
                ("REALTOR_CONTACTS_LIMIT", "500"),
                ("REALTOR_LOG_FORMAT", "xml"),
            ]),
        );
        assert_eq!(settings.chat.gateway_url, "ws://localhost:18789");
        assert_eq!(settings.leads.limit, 100);
        assert_eq!(settings.logging.format, LogFormat::Compact);
    }

    #[test]
    fn parse_u32_range_bounds() {
        assert_eq!(parse_u32_range("1", 1, 100), Some(1));
        assert_eq!(parse_u32_range("100", 1, 100), Some(100));
        assert_eq!(parse_u32_range("0", 1, 100), None);
        assert_eq!(parse_u32_range("abc", 1, 100), None);
    }

    #[test]
    fn settings_path_is_under_data_dir() {
        assert!(settings_path().ends_with(".realtor/settings.json"));
    }
}
