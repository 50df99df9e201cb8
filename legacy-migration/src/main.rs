//! Legacy Migration Main Entry Point
//!
//! This is the main binary for the legacy migration service. It copies
//! employees, customers, encounters, tips and events out of the legacy CRM
//! API into the new PostgreSQL store, once a day, until shut down.

use dotenv::dotenv;
use legacy_migration::{Dependencies, MigrationError};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("legacy_migration=info,legacy_migration_pipeline=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), MigrationError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!(
        service_version = env!("CARGO_PKG_VERSION"),
        "Starting legacy migration service"
    );

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.scheduler.run().await {
        Ok(()) => {
            info!("Legacy migration service stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Legacy migration service failed");
            Err(e.into())
        }
    }
}
