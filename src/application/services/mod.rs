//! Business logic services orchestrating domain operations.

mod link_service;
mod redirect_service;

pub use link_service::{BackfillSummary, LinkService};
pub use redirect_service::RedirectService;
