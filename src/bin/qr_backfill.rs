//! CLI tool that regenerates QR artifacts for stored links.
//!
//! Useful for migrating records created before artifact generation existed,
//! or for re-rendering everything after a visual profile change.
//!
//! # Usage
//!
//! ```bash
//! # Attach artifacts to links that lack one
//! cargo run --bin qr_backfill
//!
//! # Regenerate artifacts for every link
//! cargo run --bin qr_backfill -- --all
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use shortqr::application::services::LinkService;
use shortqr::infrastructure::persistence::PgLinkRepository;
use shortqr::infrastructure::qr::SvgQrBuilder;

/// Regenerates QR artifacts for stored links.
#[derive(Parser)]
#[command(name = "qr_backfill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rebuild artifacts for every link, not only those missing one
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let links = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(links, Arc::new(SvgQrBuilder::new()));

    let summary = service.backfill_qr_artifacts(!cli.all).await?;

    tracing::info!(
        total = summary.total,
        rebuilt = summary.rebuilt,
        skipped = summary.skipped,
        failed = summary.failed,
        "Backfill complete"
    );

    Ok(())
}
