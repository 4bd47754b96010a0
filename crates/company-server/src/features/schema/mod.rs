//! Schema maintenance: wipe every company table in one step

pub mod restart;
pub mod routes;

pub use restart::{RestartSchemaError, RestartSchemaResponse};
pub use routes::schema_routes;
