//! API route configuration.

use crate::api::handlers::{create_link_handler, delete_link_handler, list_links_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// JSON API routes.
///
/// # Endpoints
///
/// - `GET    /links`       - List all links, newest first
/// - `POST   /links`       - Create a short link
/// - `DELETE /links/{id}`  - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{id}", delete(delete_link_handler))
}
