//! CRM contacts client.
//!
//! One request per load: `GET {base}{path}?limit=N` with bearer auth. The
//! response is `{ "results": [ contact, ... ] }`; a missing `results` array
//! is an empty listing.

use std::collections::HashMap;

use realtor_settings::LeadsSettings;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{LeadsError, Result};

/// Largest page size the CRM accepts.
pub const MAX_LIMIT: u32 = 100;

/// A contact property. The CRM has shipped both `"x"` and `{ "value": "x" }`
/// shapes over time; both are accepted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// `{ "value": ... }`
    Wrapped {
        /// Inner value.
        #[serde(default)]
        value: Value,
    },
    /// A bare JSON value.
    Plain(Value),
}

impl PropertyValue {
    /// Text of the property, `None` when null or empty.
    pub fn as_text(&self) -> Option<String> {
        let raw = match self {
            Self::Wrapped { value } | Self::Plain(value) => value,
        };
        let text = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        if text.is_empty() { None } else { Some(text) }
    }
}

/// One CRM contact as returned by the listing endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// CRM id (string or number on the wire).
    #[serde(default)]
    pub id: Value,
    /// Named properties.
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Contact {
    /// Id as text (empty when absent).
    pub fn id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Text of property `name`, `None` when missing, null or empty.
    pub fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).and_then(PropertyValue::as_text)
    }
}

#[derive(Debug, Deserialize)]
struct ContactsPage {
    #[serde(default)]
    results: Vec<Contact>,
}

/// HTTP client for the CRM contacts endpoint.
#[derive(Clone, Debug)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
    contacts_path: String,
    limit: u32,
}

impl CrmClient {
    /// Client for `base_url` with the default path and page size.
    pub fn new(base_url: impl Into<String>) -> Self {
        let defaults = LeadsSettings::default();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            contacts_path: defaults.contacts_path,
            limit: defaults.limit,
        }
    }

    /// Client configured from dashboard settings.
    pub fn from_settings(settings: &LeadsSettings) -> Self {
        Self::new(settings.api_base_url.clone())
            .with_contacts_path(settings.contacts_path.clone())
            .with_limit(settings.limit)
    }

    /// Override the listing path.
    #[must_use]
    pub fn with_contacts_path(mut self, path: impl Into<String>) -> Self {
        self.contacts_path = path.into();
        self
    }

    /// Override the page size. Clamped to `1..=100`.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// Page size sent as `limit`.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Full listing URL without the query.
    pub fn contacts_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.contacts_path.starts_with('/') {
            format!("{base}{}", self.contacts_path)
        } else {
            format!("{base}/{}", self.contacts_path)
        }
    }

    /// Fetch one page of contacts.
    pub async fn fetch_contacts(&self, api_key: &str) -> Result<Vec<Contact>> {
        let url = self.contacts_url();
        debug!(%url, limit = self.limit, "fetching CRM contacts");

        let response = self
            .http
            .get(&url)
            .query(&[("limit", self.limit)])
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(LeadsError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("CRM rejected API key");
            return Err(LeadsError::InvalidCredential);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "CRM request failed");
            return Err(LeadsError::Api {
                status: status.as_u16(),
            });
        }

        let page: ContactsPage = response.json().await.map_err(LeadsError::Decode)?;
        info!(count = page.results.len(), "fetched CRM contacts");
        Ok(page.results)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
