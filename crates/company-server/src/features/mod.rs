//! Feature modules implementing the company API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes.
//!
//! # Features
//!
//! - **entities**: create, fetch and delete single employees, departments and jobs
//! - **loads**: batched bulk loading of serialized record lists
//! - **schema**: truncation of all company tables
//! - **kpi**: hiring reports
//!
//! # Architecture
//!
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions and error-to-response mapping
//!
//! All routes share a `PgPool` as router state; every operation acquires its
//! own connection or transaction from it.

pub mod entities;
pub mod kpi;
pub mod loads;
pub mod schema;
pub mod shared;

use axum::Router;
use sqlx::PgPool;

use crate::models::{Department, Employee, Job};

/// Creates the router with every feature route mounted at its absolute path
///
/// `load_body_limit` caps request bodies on the bulk load endpoints only.
pub fn router(pool: PgPool, load_body_limit: usize) -> Router<()> {
    Router::new()
        .merge(entities::entity_routes::<Employee>())
        .merge(entities::entity_routes::<Department>())
        .merge(entities::entity_routes::<Job>())
        .merge(loads::loads_routes(load_body_limit))
        .merge(schema::schema_routes())
        .merge(kpi::kpi_routes())
        .with_state(pool)
}
