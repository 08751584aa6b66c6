//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::create_link::CreateLinkRequest;
use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "target": "https://example.com",
///   "code": "my-link"   // optional custom code
/// }
/// ```
///
/// # Behavior
///
/// The target is normalized to carry a scheme (`http://` is prepended when
/// missing). The record is persisted first; the QR artifact is then built
/// and attached, and a build failure leaves `qr_artifact` null without
/// failing the request.
///
/// # Errors
///
/// Returns 400 Bad Request on a missing/invalid target or custom code.
/// Returns 409 Conflict when the custom code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.target, payload.code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists all links, most recently created first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    let responses = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();

    Ok(Json(responses))
}

/// Deletes a link by id.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Behavior
///
/// The record is removed outright; its code stops resolving immediately.
///
/// # Errors
///
/// Returns 404 Not Found when the id does not exist.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let deleted = state.link_service.delete_link(id).await?;

    if !deleted {
        return Err(AppError::not_found("Link not found", json!({ "id": id })));
    }

    Ok(StatusCode::NO_CONTENT)
}
