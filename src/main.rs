use anyhow::Result;

use mech_data_service::catalog::create_module_catalog;
use mech_data_service::config::{Settings, StoreBackend};
use mech_data_service::metrics::encode_metrics;
use mech_data_service::postgres::{test_database_connection, verify_player_key, PostgresPool};
use mech_data_service::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    telemetry::init_tracing(&settings.log);
    tracing::info!("Initializing data service...");

    if settings.database.backend == StoreBackend::Memory {
        tracing::warn!(
            backend = settings.database.backend.as_str(),
            "Non-database backend selected, skipping database checks"
        );
        tracing::info!("Initialization complete");
        return Ok(());
    }

    let pool = PostgresPool::new(&settings.database);

    // Fail fast if the database is unreachable
    if let Err(e) = test_database_connection(&pool).await {
        tracing::error!(
            code = e.code(),
            pool_timeout = e.is_pool_timeout(),
            error = %e,
            "Initialization failed"
        );
        pool.close().await;
        std::process::exit(1);
    }
    tracing::info!("Database connection verified successfully");

    if settings.database.run_migrations {
        pool.run_migrations().await?;
    }

    verify_player_key(pool.pool()).await?;

    let catalog = create_module_catalog(&settings.database, Some(&pool));
    match catalog.load_modules().await {
        Ok(modules) => tracing::info!(count = modules.len(), "Module catalog loaded"),
        Err(e) => {
            tracing::error!(
                code = e.code(),
                pool_timeout = e.is_pool_timeout(),
                error = %e,
                "Initialization failed"
            );
            pool.close().await;
            std::process::exit(1);
        }
    }

    match encode_metrics() {
        Ok(text) => tracing::debug!(metrics = %text, "Startup query metrics"),
        Err(e) => tracing::warn!(error = %e, "Failed to encode metrics"),
    }

    tracing::info!("Initialization complete");
    pool.close().await;
    Ok(())
}
