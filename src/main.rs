//! # Shipping ERP
//!
//! Backend for a logistics company: fleet, drivers, shipments, clients,
//! staff and billing behind a session-authenticated JSON API.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool, migrations and optional demo data
//! - HTTP server

use anyhow::Result;
use tracing::info;

use shipping_erp::config::Settings;
use shipping_erp::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings first: the log format is configurable
    let settings = Settings::load()?;

    shipping_erp::telemetry::init_tracing(settings.logging.format);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
