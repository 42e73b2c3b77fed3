//! Plain-text rendering of stats and lead cards.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::lead::Lead;
use crate::stats::{LeadStats, StatusFilter};

/// Shown when the filtered list is empty.
pub const EMPTY_LIST_TEXT: &str = "No leads found";

/// One-line summary of the counters.
pub fn render_stats(stats: &LeadStats) -> String {
    format!(
        "Total: {} | 🔴 Hot: {} | 🟡 Warm: {} | 🔵 Cold: {}",
        stats.total, stats.hot, stats.warm, stats.cold
    )
}

/// Render one lead card.
pub fn render_card(lead: &Lead, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  {}",
        lead.status.badge(),
        lead.status.as_str().to_uppercase(),
        lead.name
    );
    let rows = [
        ("📧", "Email", &lead.email),
        ("📞", "Phone", &lead.phone),
        ("💰", "Budget", &lead.budget),
        ("⏰", "Timeline", &lead.timeline),
        ("📝", "Needs", &lead.needs),
    ];
    for (icon, label, value) in rows {
        let _ = writeln!(out, "  {icon} {label}: {value}");
    }
    let _ = write!(out, "  📅 {}", lead.age_label(now));
    out
}

/// Render every lead passing `filter`, separated by blank lines.
pub fn render_leads(leads: &[Lead], filter: StatusFilter, now: DateTime<Utc>) -> String {
    let cards: Vec<String> = leads
        .iter()
        .filter(|lead| filter.matches(lead))
        .map(|lead| render_card(lead, now))
        .collect();
    if cards.is_empty() {
        EMPTY_LIST_TEXT.to_string()
    } else {
        cards.join("\n\n")
    }
}
