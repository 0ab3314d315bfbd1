//! Seed the database with demo data.
//!
//! Applies migrations first, then inserts the demo fleet unless users already
//! exist. Safe to run repeatedly.

use anyhow::{Context, Result};
use tracing::info;

use shipping_erp::config::Settings;
use shipping_erp::infrastructure::database::{self, SeedOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    shipping_erp::telemetry::init_tracing(settings.logging.format);

    let pool = database::create_pool(&settings.database)
        .await
        .context("Failed to connect to PostgreSQL")?;

    database::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match database::seed_database(&pool).await? {
        SeedOutcome::Seeded => info!(
            username = database::seed::ADMIN_USERNAME,
            "Seed complete"
        ),
        SeedOutcome::AlreadyPopulated => info!("Database already populated, nothing to do"),
    }

    pool.close().await;
    Ok(())
}
