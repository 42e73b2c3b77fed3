//! Gateway locator.
//!
//! Resolves where the chat gateway lives. An override (CLI flag or the
//! `gateway` query parameter of the hosting page) wins over the configured
//! default.

/// Query parameter that overrides the gateway address.
pub const GATEWAY_QUERY_PARAM: &str = "gateway";

/// Resolves the gateway address and the WebSocket endpoint on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayLocator {
    default_url: String,
    override_url: Option<String>,
    path: String,
}

impl GatewayLocator {
    /// Locator with a default address and the endpoint path (e.g. `/ws`).
    pub fn new(default_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
            override_url: None,
            path: path.into(),
        }
    }

    /// Build from chat settings.
    pub fn from_settings(settings: &realtor_settings::ChatSettings) -> Self {
        Self::new(settings.gateway_url.clone(), settings.gateway_path.clone())
    }

    /// Set an explicit override. Empty strings are treated as absent.
    #[must_use]
    pub fn with_override(mut self, url: Option<String>) -> Self {
        self.override_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Take the override from a page query string (`?gateway=...`).
    ///
    /// The leading `?` is optional. Values are percent-decoded.
    #[must_use]
    pub fn with_query(self, query: &str) -> Self {
        let value = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(k, _)| k == GATEWAY_QUERY_PARAM)
            .map(|(_, v)| v.into_owned());
        match value {
            Some(v) => self.with_override(Some(v)),
            None => self,
        }
    }

    /// Whether an override is in effect.
    pub fn is_overridden(&self) -> bool {
        self.override_url.is_some()
    }

    /// The resolved gateway address.
    pub fn resolve(&self) -> &str {
        self.override_url.as_deref().unwrap_or(&self.default_url)
    }

    /// Full WebSocket endpoint: resolved address plus the endpoint path.
    pub fn endpoint(&self) -> String {
        let base = self.resolve().trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{base}{}", self.path)
        } else {
            format!("{base}/{}", self.path)
        }
    }
}
