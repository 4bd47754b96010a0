use sqlx::PgPool;

use crate::models::{self, Entity};

#[derive(Debug, thiserror::Error)]
pub enum GetEntityError {
    #[error("{label} not found. Id: {id}")]
    NotFound { label: &'static str, id: i32 },

    #[error("Problem fetching {} id {id}: {source}", .label.to_lowercase())]
    Database {
        label: &'static str,
        id: i32,
        #[source]
        source: sqlx::Error,
    },
}

#[tracing::instrument(skip(pool), fields(kind = %E::KIND))]
pub async fn handle<E: Entity>(pool: PgPool, id: i32) -> Result<E, GetEntityError> {
    let storage_error = |source| GetEntityError::Database {
        label: E::LABEL,
        id,
        source,
    };

    let mut conn = pool.acquire().await.map_err(storage_error)?;

    models::find_by_id::<E>(&mut conn, id)
        .await
        .map_err(storage_error)?
        .ok_or(GetEntityError::NotFound { label: E::LABEL, id })
}
