//! JSON representation of a link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;
use crate::utils::short_url::absolute_short_url;

/// Full link representation returned by the API.
///
/// `short_url` is derived at presentation time from the configured base;
/// `qr_artifact` is `null` until the builder has attached one.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target: String,
    pub short_url: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub qr_artifact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response for `link`, deriving `short_url` from `base`.
    pub fn from_link(link: Link, base: &str) -> Self {
        let short_url = absolute_short_url(base, &link.code);

        Self {
            id: link.id,
            code: link.code,
            target: link.target_url,
            short_url,
            click_count: link.click_count,
            last_clicked_at: link.last_clicked_at,
            qr_artifact: link.qr_artifact,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
