//! Transient error and success banners.

use std::time::{Duration, Instant};

use realtor_settings::LeadsSettings;

/// Banner kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Failure banner, prefixed `❌`.
    Error,
    /// Success banner, prefixed `✅`.
    Success,
}

/// One banner with its expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Banner kind.
    pub kind: NoticeKind,
    /// Displayed text, including the prefix.
    pub text: String,
    /// Moment the banner disappears.
    pub expires_at: Instant,
}

/// Stack of banners that expire on their own.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    error_ttl: Duration,
    success_ttl: Duration,
    notices: Vec<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(3))
    }
}

impl NoticeBoard {
    /// Board with explicit lifetimes.
    pub fn new(error_ttl: Duration, success_ttl: Duration) -> Self {
        Self {
            error_ttl,
            success_ttl,
            notices: Vec::new(),
        }
    }

    /// Board with lifetimes from settings.
    pub fn from_settings(settings: &LeadsSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.error_notice_ms),
            Duration::from_millis(settings.success_notice_ms),
        )
    }

    /// Post an error banner.
    pub fn error(&mut self, message: &str, now: Instant) -> &Notice {
        self.push(NoticeKind::Error, format!("❌ {message}"), now + self.error_ttl)
    }

    /// Post a success banner.
    pub fn success(&mut self, message: &str, now: Instant) -> &Notice {
        self.push(NoticeKind::Success, format!("✅ {message}"), now + self.success_ttl)
    }

    fn push(&mut self, kind: NoticeKind, text: String, expires_at: Instant) -> &Notice {
        self.notices.push(Notice {
            kind,
            text,
            expires_at,
        });
        &self.notices[self.notices.len() - 1]
    }

    /// Drop expired banners and return the rest, oldest first.
    pub fn active(&mut self, now: Instant) -> &[Notice] {
        self.notices.retain(|n| n.expires_at > now);
        &self.notices
    }
}
