//! `realtor leads`: load the dashboard once and print it.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use realtor_core::KeyValueStore;
use realtor_leads::{CrmClient, LeadDashboard, LeadsError, StatusFilter};
use realtor_settings::RealtorSettings;

/// Load leads with the given key (or the saved one) and print notices,
/// stats and cards.
pub async fn run(
    settings: &RealtorSettings,
    store: Arc<dyn KeyValueStore>,
    api_key: Option<String>,
    filter: StatusFilter,
) -> Result<()> {
    let client = CrmClient::from_settings(&settings.leads);
    let mut dashboard = LeadDashboard::new(client, store, &settings.leads)
        .context("Failed to open lead dashboard")?;
    dashboard.set_filter(filter);

    let outcome = match api_key {
        Some(key) => dashboard.submit_api_key(&key).await,
        None => dashboard
            .start()
            .await
            .unwrap_or(Err(LeadsError::MissingCredential)),
    };

    for notice in dashboard.notices(Instant::now()) {
        println!("{}", notice.text);
    }

    let _count = outcome.context("Failed to load leads")?;
    println!();
    println!("{}", dashboard.render(Utc::now()));
    Ok(())
}
