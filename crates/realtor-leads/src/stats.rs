//! Lead counts and the status filter.

use std::fmt;
use std::str::FromStr;

use crate::lead::{Lead, LeadStatus};

/// Counts per temperature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeadStats {
    /// All leads.
    pub total: usize,
    /// Hot leads.
    pub hot: usize,
    /// Warm leads.
    pub warm: usize,
    /// Cold leads.
    pub cold: usize,
}

impl LeadStats {
    /// Count `leads`.
    pub fn from_leads(leads: &[Lead]) -> Self {
        leads.iter().fold(
            Self {
                total: leads.len(),
                ..Self::default()
            },
            |mut stats, lead| {
                match lead.status {
                    LeadStatus::Hot => stats.hot += 1,
                    LeadStatus::Warm => stats.warm += 1,
                    LeadStatus::Cold => stats.cold += 1,
                    LeadStatus::Other(_) => {}
                }
                stats
            },
        )
    }
}

/// Which leads the list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Everything.
    #[default]
    All,
    /// Hot only.
    Hot,
    /// Warm only.
    Warm,
    /// Cold only.
    Cold,
}

impl StatusFilter {
    /// Whether `lead` passes the filter.
    pub fn matches(self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::Hot => lead.status == LeadStatus::Hot,
            Self::Warm => lead.status == LeadStatus::Warm,
            Self::Cold => lead.status == LeadStatus::Cold,
        }
    }

    /// Filter name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "hot" => Ok(Self::Hot),
            "warm" => Ok(Self::Warm),
            "cold" => Ok(Self::Cold),
            other => Err(format!(
                "unknown filter '{other}' (expected all, hot, warm or cold)"
            )),
        }
    }
}
