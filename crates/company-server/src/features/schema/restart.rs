use company_common::EntityKind;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartSchemaResponse {
    pub truncated: Vec<EntityKind>,
}

#[derive(Debug, thiserror::Error)]
pub enum RestartSchemaError {
    #[error("Problem restarting schema: {0}")]
    Database(#[from] sqlx::Error),
}

/// Empty the employees, departments and jobs tables.
///
/// Constraint checking is deferred around the truncation so that
/// cross-table references never block it. Running this twice in a row
/// leaves the tables empty both times.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<RestartSchemaResponse, RestartSchemaError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET CONSTRAINTS ALL DEFERRED")
        .execute(&mut *tx)
        .await?;
    sqlx::query("TRUNCATE TABLE employees, departments, jobs")
        .execute(&mut *tx)
        .await?;
    sqlx::query("SET CONSTRAINTS ALL IMMEDIATE")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("Schema restarted");

    Ok(RestartSchemaResponse {
        truncated: EntityKind::ALL.to_vec(),
    })
}
