use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::{self, Entity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntityResponse {
    pub id: i32,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteEntityError {
    #[error("{label} not found. Id: {id}")]
    NotFound { label: &'static str, id: i32 },

    #[error("Problem deleting {} id {id}: {source}", .label.to_lowercase())]
    Storage {
        label: &'static str,
        id: i32,
        #[source]
        source: sqlx::Error,
    },
}

#[tracing::instrument(skip(pool), fields(kind = %E::KIND))]
pub async fn handle<E: Entity>(pool: PgPool, id: i32) -> Result<DeleteEntityResponse, DeleteEntityError> {
    let storage_error = |source| DeleteEntityError::Storage {
        label: E::LABEL,
        id,
        source,
    };

    let mut conn = pool.acquire().await.map_err(storage_error)?;

    let existing = models::find_by_id::<E>(&mut conn, id)
        .await
        .map_err(storage_error)?;
    if existing.is_none() {
        return Err(DeleteEntityError::NotFound { label: E::LABEL, id });
    }

    let deleted = models::delete_by_id::<E>(&mut conn, id)
        .await
        .map_err(storage_error)?;

    // Lost a race with another delete between the lookup and the delete.
    if !deleted {
        return Err(DeleteEntityError::NotFound { label: E::LABEL, id });
    }

    Ok(DeleteEntityResponse { id, deleted })
}
