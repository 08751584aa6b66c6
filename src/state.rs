//! Shared application state.
//!
//! The store handle is an explicitly constructed, injected dependency: the
//! pool is built once at startup and threaded through the repositories into
//! the services, so tests can wire the same state against a scratch
//! database (or mock the repositories at the service level).

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::infrastructure::persistence::PgLinkRepository;
use crate::infrastructure::qr::SvgQrBuilder;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository, SvgQrBuilder>>,
    pub redirect_service: Arc<RedirectService<PgLinkRepository>>,
    /// Base prefix for derived short URLs; empty means root-relative.
    pub base_url: String,
}

impl AppState {
    /// Wires repositories and services around a connection pool.
    pub fn new(pool: Arc<PgPool>, base_url: String) -> Self {
        let links = Arc::new(PgLinkRepository::new(pool));
        let qr = Arc::new(SvgQrBuilder::new());

        Self {
            link_service: Arc::new(LinkService::new(links.clone(), qr)),
            redirect_service: Arc::new(RedirectService::new(links)),
            base_url,
        }
    }
}
