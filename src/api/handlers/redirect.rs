//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Atomically increment `click_count` and stamp `last_clicked_at`
/// 3. Return 307 Temporary Redirect to the target
///
/// The click update happens before the response is sent, so the count
/// observed after a redirect already includes it.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist (including a
/// record deleted between lookup and update).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.redirect_service.resolve_and_record(&code).await?;

    debug!(code = %link.code, clicks = link.click_count, target = %link.target_url, "Redirecting");

    Ok(Redirect::temporary(&link.target_url))
}
