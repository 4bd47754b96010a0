//! Entity API routes
//!
//! Mounted once per entity type:
//!
//! - `POST {path}/` - Create one entity
//! - `GET {path}/:id` - Fetch an entity by id
//! - `DELETE {path}/:id` - Delete an entity by id
//!
//! where `{path}` is `/employee`, `/department` or `/job`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;

use super::{
    commands::{CreateEntityError, DeleteEntityError},
    queries::GetEntityError,
};
use crate::api::response::{rejection_error, storage_error, validation_error, ErrorResponse};
use crate::models::Entity;

// ============================================================================
// Router Configuration
// ============================================================================

/// Routes for a single entity type, registered at the absolute paths the
/// loader and clients call
pub fn entity_routes<E: Entity>() -> Router<PgPool> {
    Router::new()
        .route(&format!("{}/", E::PATH), post(create_entity::<E>))
        .route(
            &format!("{}/:id", E::PATH),
            get(get_entity::<E>).delete(delete_entity::<E>),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create one entity
///
/// # Response
///
/// - `201 Created` - The stored entity
/// - `400 Bad Request` - Malformed body, unknown or missing fields, invalid values
/// - `409 Conflict` - An entity with this id already exists
/// - `415 Unsupported Media Type` - Body is not sent as `application/json`
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(pool, payload), fields(kind = %E::KIND))]
async fn create_entity<E: Entity>(
    State(pool): State<PgPool>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Response, EntityApiError> {
    let Json(entity) = payload?;

    let created = super::commands::create::handle(pool, entity).await?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Delete an entity by id
///
/// # Response
///
/// - `200 OK` - `{"id": .., "deleted": true}`
/// - `404 Not Found` - No entity with this id
/// - `500 Internal Server Error` - Database error, cause in the message
#[tracing::instrument(skip(pool), fields(kind = %E::KIND))]
async fn delete_entity<E: Entity>(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, EntityApiError> {
    let response = super::commands::delete::handle::<E>(pool, id).await?;

    tracing::info!(id, "{} deleted via API", E::LABEL);

    Ok((StatusCode::OK, Json(response)).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// Fetch an entity by id
///
/// # Response
///
/// - `200 OK` - The entity
/// - `404 Not Found` - `"<Kind> not found. Id: <id>"`
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(pool), fields(kind = %E::KIND))]
async fn get_entity<E: Entity>(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, EntityApiError> {
    let entity = super::queries::get::handle::<E>(pool, id).await?;

    Ok((StatusCode::OK, Json(entity)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for entity API endpoints
#[derive(Debug)]
enum EntityApiError {
    Body(JsonRejection),
    Create(CreateEntityError),
    Get(GetEntityError),
    Delete(DeleteEntityError),
}

impl From<JsonRejection> for EntityApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Body(err)
    }
}

impl From<CreateEntityError> for EntityApiError {
    fn from(err: CreateEntityError) -> Self {
        Self::Create(err)
    }
}

impl From<GetEntityError> for EntityApiError {
    fn from(err: GetEntityError) -> Self {
        Self::Get(err)
    }
}

impl From<DeleteEntityError> for EntityApiError {
    fn from(err: DeleteEntityError) -> Self {
        Self::Delete(err)
    }
}

fn not_found(message: String) -> Response {
    ErrorResponse::new("NOT_FOUND", message).into_response_with(StatusCode::NOT_FOUND)
}

impl IntoResponse for EntityApiError {
    fn into_response(self) -> Response {
        match self {
            EntityApiError::Body(rejection) => rejection_error(
                rejection.status(),
                format!("Invalid payload: {}", rejection.body_text()),
            ),

            EntityApiError::Create(err @ CreateEntityError::Validation(_)) => {
                validation_error(err.to_string())
            },
            EntityApiError::Create(err @ CreateEntityError::Duplicate { .. }) => {
                ErrorResponse::new("CONFLICT", err.to_string())
                    .into_response_with(StatusCode::CONFLICT)
            },
            EntityApiError::Create(err @ CreateEntityError::Database { .. }) => {
                tracing::error!("Database error during entity creation: {}", err);
                storage_error(err.to_string())
            },

            EntityApiError::Get(err @ GetEntityError::NotFound { .. }) => {
                not_found(err.to_string())
            },
            EntityApiError::Get(err @ GetEntityError::Database { .. }) => {
                tracing::error!("Database error during entity lookup: {}", err);
                storage_error(err.to_string())
            },

            EntityApiError::Delete(err @ DeleteEntityError::NotFound { .. }) => {
                not_found(err.to_string())
            },
            EntityApiError::Delete(err @ DeleteEntityError::Storage { .. }) => {
                tracing::error!("Database error during entity deletion: {}", err);
                storage_error(err.to_string())
            },
        }
    }
}
