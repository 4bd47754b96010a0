//! Single-entity create, fetch and delete for employees, departments and jobs
//!
//! The three tables share one generic slice: handlers are written once over
//! [`Entity`](crate::models::Entity) and mounted per entity type.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateEntityError, DeleteEntityError, DeleteEntityResponse};
pub use queries::GetEntityError;
pub use routes::entity_routes;
