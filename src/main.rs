//! # Restaurant Backend
//!
//! Application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool and migrations
//! - HTTP server

use anyhow::Result;
use tracing::info;

use restaurant_backend::config::Settings;
use restaurant_backend::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: it carries the log format and filter
    let settings = Settings::load()?;

    restaurant_backend::telemetry::init_tracing(&settings.log);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.database.backend,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
