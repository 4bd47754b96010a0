//! Storage entities
//!
//! Each entity is a typed row of one table. Construction from request input
//! goes through serde with `deny_unknown_fields`, then [`Entity::validate`],
//! so nothing reaches storage without passing the fixed schema.
//!
//! SQL lives in per-entity constants; table and column names are never built
//! from request data.

use company_common::types::{fields, EntityKind};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::Query,
    FromRow, PgConnection, Postgres,
};

use crate::features::shared::{validate_text, FieldValidationError};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// A row type persisted in one of the company tables
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// Which table this entity lives in
    const KIND: EntityKind;

    /// Human-readable name used in messages ("Employee")
    const LABEL: &'static str;

    /// Route prefix for single-entity endpoints ("/employee")
    const PATH: &'static str;

    const INSERT_SQL: &'static str;
    const SELECT_BY_ID_SQL: &'static str;
    const DELETE_BY_ID_SQL: &'static str;

    fn id(&self) -> i32;

    /// Bind the insert parameters in `INSERT_SQL` order
    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn validate(&self) -> Result<(), FieldValidationError>;
}

// ============================================================================
// Employee
// ============================================================================

/// A hired employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(deny_unknown_fields)]
pub struct Employee {
    #[serde(deserialize_with = "fields::int")]
    pub id: i32,
    pub name: String,
    /// Hire timestamp, stored as received
    pub datetime: String,
    /// `-1` when unknown
    #[serde(deserialize_with = "fields::reference")]
    pub department_id: i32,
    /// `-1` when unknown
    #[serde(deserialize_with = "fields::reference")]
    pub job_id: i32,
}

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employees;
    const LABEL: &'static str = "Employee";
    const PATH: &'static str = "/employee";

    const INSERT_SQL: &'static str = r#"
        INSERT INTO employees (id, name, datetime, department_id, job_id)
        VALUES ($1, $2, $3, $4, $5)
        "#;
    const SELECT_BY_ID_SQL: &'static str =
        "SELECT id, name, datetime, department_id, job_id FROM employees WHERE id = $1";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM employees WHERE id = $1";

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.name.as_str())
            .bind(self.datetime.as_str())
            .bind(self.department_id)
            .bind(self.job_id)
    }

    fn validate(&self) -> Result<(), FieldValidationError> {
        validate_text("name", &self.name, 300)?;
        validate_text("datetime", &self.datetime, 45)
    }
}

// ============================================================================
// Department
// ============================================================================

/// A department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(deny_unknown_fields)]
pub struct Department {
    #[serde(deserialize_with = "fields::int")]
    pub id: i32,
    pub department: String,
}

impl Entity for Department {
    const KIND: EntityKind = EntityKind::Departments;
    const LABEL: &'static str = "Department";
    const PATH: &'static str = "/department";

    const INSERT_SQL: &'static str = "INSERT INTO departments (id, department) VALUES ($1, $2)";
    const SELECT_BY_ID_SQL: &'static str =
        "SELECT id, department FROM departments WHERE id = $1";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM departments WHERE id = $1";

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.id).bind(self.department.as_str())
    }

    fn validate(&self) -> Result<(), FieldValidationError> {
        validate_text("department", &self.department, 100)
    }
}

// ============================================================================
// Job
// ============================================================================

/// A job title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(deny_unknown_fields)]
pub struct Job {
    #[serde(deserialize_with = "fields::int")]
    pub id: i32,
    pub job: String,
}

impl Entity for Job {
    const KIND: EntityKind = EntityKind::Jobs;
    const LABEL: &'static str = "Job";
    const PATH: &'static str = "/job";

    const INSERT_SQL: &'static str = "INSERT INTO jobs (id, job) VALUES ($1, $2)";
    const SELECT_BY_ID_SQL: &'static str = "SELECT id, job FROM jobs WHERE id = $1";
    const DELETE_BY_ID_SQL: &'static str = "DELETE FROM jobs WHERE id = $1";

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.id).bind(self.job.as_str())
    }

    fn validate(&self) -> Result<(), FieldValidationError> {
        validate_text("job", &self.job, 100)
    }
}

// ============================================================================
// Storage operations
// ============================================================================

/// Stage one entity for write on the given connection or transaction
pub async fn insert<E: Entity>(conn: &mut PgConnection, entity: &E) -> sqlx::Result<()> {
    entity
        .bind_insert(sqlx::query(E::INSERT_SQL))
        .execute(conn)
        .await?;
    Ok(())
}

/// Look an entity up by id
pub async fn find_by_id<E: Entity>(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<E>> {
    sqlx::query_as::<_, E>(E::SELECT_BY_ID_SQL)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Delete an entity by id, returning whether a row was removed
pub async fn delete_by_id<E: Entity>(conn: &mut PgConnection, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query(E::DELETE_BY_ID_SQL).bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
