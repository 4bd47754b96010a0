//! Connection pool setup
//!
//! The pool is the only long-lived storage handle. Request handlers and the
//! batch loader acquire connections or transactions from it per operation;
//! they are returned to the pool on drop, on success and error paths alike.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Database setup errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failed to apply
    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
}

/// Connect a pool eagerly, failing fast when the database is unreachable
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    let pool = pool_options(config).connect(&config.url).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Build a pool without connecting; connections are opened on first use
pub fn create_lazy_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    Ok(pool_options(config).connect_lazy(&config.url)?)
}

/// Apply the bundled migrations
pub async fn migrate(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        let mut config = Config::default().database;
        config.url = "postgresql://nobody@127.0.0.1:1/nowhere".to_string();
        config.min_connections = 0;
        let pool = create_lazy_pool(&config).unwrap();
        assert!(!pool.is_closed());
    }

    #[tokio::test]
    async fn test_lazy_pool_rejects_malformed_url() {
        let mut config = Config::default().database;
        config.url = "not a url".to_string();
        assert!(create_lazy_pool(&config).is_err());
    }
}
