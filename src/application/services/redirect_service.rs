//! Redirect resolution with atomic click accounting.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Resolves short codes to their targets, recording each hit.
///
/// The click update is a single atomic increment-and-stamp in the store, so
/// N concurrent redirects of the same code yield exactly N increments. A
/// lookup miss is terminal; there are no retries.
pub struct RedirectService<R: LinkRepository> {
    links: Arc<R>,
}

impl<R: LinkRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(links: Arc<R>) -> Self {
        Self { links }
    }

    /// Looks up `code`, records the click, and returns the updated link.
    ///
    /// The returned link carries the post-increment `click_count` and the
    /// `target_url` the caller should redirect to. A record deleted between
    /// lookup and update is reported as a miss, never as a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code does not resolve.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_and_record(&self, code: &str) -> Result<Link, AppError> {
        let miss = || AppError::not_found("Short link not found", json!({ "code": code }));

        let link = self.links.find_by_code(code).await?.ok_or_else(miss)?;

        self.links.record_click(link.id).await?.ok_or_else(miss)
    }
}
