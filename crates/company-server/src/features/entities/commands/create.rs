//! Create one entity from a validated field mapping

use sqlx::PgPool;

use crate::features::shared::{error_helpers::map_unique_violation, FieldValidationError};
use crate::models::{self, Entity};

/// Errors that can occur when creating an entity
#[derive(Debug, thiserror::Error)]
pub enum CreateEntityError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldValidationError),

    #[error("{label} with id {id} already exists")]
    Duplicate { label: &'static str, id: i32 },

    #[error("Problem creating {} id {id}: {source}", .label.to_lowercase())]
    Database {
        label: &'static str,
        id: i32,
        #[source]
        source: sqlx::Error,
    },
}

/// Validate and insert an entity, returning it as stored
#[tracing::instrument(skip(pool, entity), fields(kind = %E::KIND, id = entity.id()))]
pub async fn handle<E: Entity>(pool: PgPool, entity: E) -> Result<E, CreateEntityError> {
    entity.validate()?;

    let id = entity.id();
    let storage_error = |source| CreateEntityError::Database {
        label: E::LABEL,
        id,
        source,
    };

    let mut conn = pool.acquire().await.map_err(storage_error)?;

    models::insert(&mut conn, &entity).await.map_err(|e| {
        map_unique_violation(
            e,
            CreateEntityError::Duplicate {
                label: E::LABEL,
                id,
            },
            storage_error,
        )
    })?;

    tracing::info!("{} created", E::LABEL);

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Employee};

    #[test]
    fn test_error_messages() {
        let err = CreateEntityError::Duplicate {
            label: "Department",
            id: 4,
        };
        assert_eq!(err.to_string(), "Department with id 4 already exists");

        let err = CreateEntityError::Database {
            label: "Employee",
            id: 9,
            source: sqlx::Error::PoolTimedOut,
        };
        assert!(err.to_string().starts_with("Problem creating employee id 9:"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_handle_creates_department(pool: PgPool) -> sqlx::Result<()> {
        let department = Department {
            id: 1,
            department: "Eng".to_string(),
        };

        let created = handle(pool.clone(), department.clone()).await.unwrap();
        assert_eq!(created, department);

        let duplicate = handle(pool.clone(), department).await;
        assert!(matches!(
            duplicate,
            Err(CreateEntityError::Duplicate { id: 1, .. })
        ));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_handle_rejects_invalid_before_storage(pool: PgPool) -> sqlx::Result<()> {
        let employee = Employee {
            id: 1,
            name: "n".repeat(301),
            datetime: "2021-01-01T00:00:00Z".to_string(),
            department_id: 1,
            job_id: 1,
        };

        let result = handle(pool.clone(), employee).await;
        assert!(matches!(result, Err(CreateEntityError::Validation(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);
        Ok(())
    }
}
