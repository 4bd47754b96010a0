//! `DELETE /restart-schema/`

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::delete,
    Json, Router,
};
use sqlx::PgPool;

use super::restart::{RestartSchemaError, RestartSchemaResponse};
use crate::api::response::storage_error;

pub fn schema_routes() -> Router<PgPool> {
    Router::new().route("/restart-schema/", delete(restart_schema))
}

async fn restart_schema(
    State(pool): State<PgPool>,
) -> Result<Json<RestartSchemaResponse>, RestartSchemaError> {
    Ok(Json(super::restart::handle(pool).await?))
}

impl IntoResponse for RestartSchemaError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        storage_error(self.to_string())
    }
}
