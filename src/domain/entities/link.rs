//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with click analytics and an optional QR artifact.
///
/// Represents the mapping between a short code and a target URL, together
/// with the usage counters maintained by redirect resolution. The
/// `qr_artifact` field is filled in after creation and may stay empty when
/// artifact generation fails; redirects never depend on it.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub qr_artifact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if a QR artifact has been attached to this link.
    pub fn has_artifact(&self) -> bool {
        self.qr_artifact.is_some()
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_clicked(&self) -> bool {
        self.click_count > 0
    }
}

/// Input data for creating a new link.
///
/// Counters and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}
