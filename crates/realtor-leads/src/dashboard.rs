//! Lead dashboard controller.
//!
//! Holds the API key (persisted in the [`KeyValueStore`]), the loaded leads,
//! the active filter and the notice banners. Every load outcome is reported
//! through a banner; the `Result` is returned as well for callers that want
//! to act on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use realtor_core::KeyValueStore;
use realtor_settings::LeadsSettings;
use tracing::{info, warn};

use crate::client::CrmClient;
use crate::errors::{LeadsError, Result};
use crate::lead::Lead;
use crate::notice::{Notice, NoticeBoard};
use crate::render::{render_leads, render_stats};
use crate::stats::{LeadStats, StatusFilter};

/// Shared view of the dashboard's in-flight flag.
#[derive(Clone, Debug, Default)]
pub struct LoadingIndicator(Arc<AtomicBool>);

impl LoadingIndicator {
    /// Whether a load is running.
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::Release);
    }
}

/// Clears the loading flag when dropped, even if the load future is.
struct LoadingGuard<'a>(&'a LoadingIndicator);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// The lead dashboard.
pub struct LeadDashboard {
    client: CrmClient,
    store: Arc<dyn KeyValueStore>,
    api_key_name: String,
    api_key: String,
    leads: Vec<Lead>,
    filter: StatusFilter,
    notices: NoticeBoard,
    loading: LoadingIndicator,
}

impl LeadDashboard {
    /// Create a dashboard, restoring a previously saved API key.
    pub fn new(
        client: CrmClient,
        store: Arc<dyn KeyValueStore>,
        settings: &LeadsSettings,
    ) -> Result<Self> {
        let api_key = store.get(&settings.api_key_name)?.unwrap_or_default();
        Ok(Self {
            client,
            store,
            api_key_name: settings.api_key_name.clone(),
            api_key,
            leads: Vec::new(),
            filter: StatusFilter::All,
            notices: NoticeBoard::from_settings(settings),
            loading: LoadingIndicator::default(),
        })
    }

    /// Load immediately if a saved key was restored. Returns `None` when
    /// there was nothing to load.
    pub async fn start(&mut self) -> Option<Result<usize>> {
        if self.api_key.is_empty() {
            return None;
        }
        info!("saved CRM key found, loading leads");
        Some(self.load().await)
    }

    /// Accept a key typed by the user: validate, persist, then load.
    pub async fn submit_api_key(&mut self, input: &str) -> Result<usize> {
        let key = input.trim();
        if key.is_empty() {
            let err = LeadsError::MissingCredential;
            let _ = self.notices.error(&err.to_string(), Instant::now());
            return Err(err);
        }
        self.api_key = key.to_string();
        if let Err(e) = self.store.set(&self.api_key_name, key) {
            warn!(error = %e, "failed to persist CRM key");
        }
        self.load().await
    }

    /// Fetch contacts with the current key and replace the lead list.
    pub async fn load(&mut self) -> Result<usize> {
        self.loading.set(true);
        let _guard = LoadingGuard(&self.loading);

        match self.client.fetch_contacts(&self.api_key).await {
            Ok(contacts) => {
                self.leads = contacts.iter().map(Lead::from_contact).collect();
                let count = self.leads.len();
                info!(count, "leads loaded");
                let _ = self
                    .notices
                    .success(&format!("Loaded {count} leads"), Instant::now());
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "failed to load leads");
                let _ = self.notices.error(&e.to_string(), Instant::now());
                Err(e)
            }
        }
    }

    /// Change which leads are listed.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Active filter.
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Current API key (empty when none).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// All loaded leads.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Leads passing the active filter.
    pub fn visible_leads(&self) -> impl Iterator<Item = &Lead> {
        let filter = self.filter;
        self.leads.iter().filter(move |lead| filter.matches(lead))
    }

    /// Counters over all loaded leads.
    pub fn stats(&self) -> LeadStats {
        LeadStats::from_leads(&self.leads)
    }

    /// Whether a load is running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle observing the loading flag from elsewhere.
    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.loading.clone()
    }

    /// Unexpired banners.
    pub fn notices(&mut self, now: Instant) -> &[Notice] {
        self.notices.active(now)
    }

    /// Stats line and the filtered lead list.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}\n\n{}",
            render_stats(&self.stats()),
            render_leads(&self.leads, self.filter, now)
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
