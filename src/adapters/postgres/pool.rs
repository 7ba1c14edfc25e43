//! Connection pool setup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::errors::map_sqlx_error;
use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool sized and timed per `config`, then applies migrations if
/// `run_migrations` is set.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| map_sqlx_error("connect to database", e))?;

    info!(
        max_connections = config.max_connections,
        "PostgreSQL pool connected"
    );

    if config.run_migrations {
        run_migrations(&pool).await?;
    }
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::store_unavailable(format!("Failed to run migrations: {}", e)))?;
    info!("Database migrations applied");
    Ok(())
}
