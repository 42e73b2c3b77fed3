//! Lead model derived from CRM contacts.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::client::Contact;

/// Placeholder for missing contact fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Lead temperature from `hs_lead_status`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    /// Ready to buy.
    Hot,
    /// Interested.
    Warm,
    /// Not engaged.
    Cold,
    /// Any other status, kept verbatim (`unknown` when absent).
    Other(String),
}

impl LeadStatus {
    /// Classify a raw status. `hot`/`warm`/`cold` match case-insensitively.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Other("unknown".to_string());
        };
        match raw.to_ascii_lowercase().as_str() {
            "hot" => Self::Hot,
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Status text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Other(s) => s,
        }
    }

    /// Coloured badge for the status.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Hot => "🔴",
            Self::Warm => "🟡",
            Self::Cold => "🔵",
            Self::Other(_) => "⚪",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lead ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Lead {
    /// CRM id.
    pub id: String,
    /// Display name, `Unknown` when the contact has none.
    pub name: String,
    /// Email or `N/A`.
    pub email: String,
    /// Phone or `N/A`.
    pub phone: String,
    /// Temperature.
    pub status: LeadStatus,
    /// Stated budget or `N/A`.
    pub budget: String,
    /// Buying timeline or `N/A`.
    pub timeline: String,
    /// Free-form needs or `N/A`.
    pub needs: String,
    /// When the contact was created, if known.
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// Build a lead from a CRM contact.
    pub fn from_contact(contact: &Contact) -> Self {
        let or_na = |name: &str| contact.property(name).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let first = contact.property("firstname").unwrap_or_default();
        let last = contact.property("lastname").unwrap_or_default();
        let full = format!("{} {}", first.trim(), last.trim());
        let name = match full.trim() {
            "" => "Unknown".to_string(),
            trimmed => trimmed.to_string(),
        };

        let created_at = contact
            .created_at
            .clone()
            .or_else(|| contact.property("createdate"))
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            id: contact.id(),
            name,
            email: or_na("email"),
            phone: or_na("phone"),
            status: LeadStatus::parse(contact.property("hs_lead_status").as_deref()),
            budget: or_na("leadbudget"),
            timeline: or_na("leadtimeline"),
            needs: or_na("leadneeds"),
            created_at,
        }
    }

    /// Whole days since creation, `None` without a timestamp.
    pub fn days_old(&self, now: DateTime<Utc>) -> Option<i64> {
        self.created_at.map(|created| (now - created).num_days())
    }

    /// `Today`, `Nd ago`, or `Unknown`. Future timestamps count as today.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        match self.days_old(now) {
            None => "Unknown".to_string(),
            Some(days) if days <= 0 => "Today".to_string(),
            Some(days) => format!("{days}d ago"),
        }
    }
}
