//! Lead dashboard settings.

use serde::{Deserialize, Serialize};

/// CRM API and dashboard presentation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadsSettings {
    /// CRM API origin.
    pub api_base_url: String,
    /// Path of the contacts listing endpoint.
    pub contacts_path: String,
    /// Maximum number of contacts requested per load.
    pub limit: u32,
    /// Store key holding the saved CRM API key.
    pub api_key_name: String,
    /// How long error banners stay visible, in milliseconds.
    pub error_notice_ms: u64,
    /// How long success banners stay visible, in milliseconds.
    pub success_notice_ms: u64,
}

impl Default for LeadsSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.hubapi.com".to_string(),
            contacts_path: "/crm/v3/objects/contacts".to_string(),
            limit: 100,
            api_key_name: "hubspot_api_key".to_string(),
            error_notice_ms: 5000,
            success_notice_ms: 3000,
        }
    }
}
