//! Bulk load routes
//!
//! - `POST /load-departments/`
//! - `POST /load-jobs/`
//! - `POST /load-employees/`
//!
//! Each accepts `{"records": "<serialized JSON list>"}` and answers with a
//! [`LoadSummary`]. Bodies may be as large as the configured
//! `max_load_body_bytes`, well above axum's 2 MB default.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use company_common::{EntityKind, LoadSummary};
use serde_json::json;
use sqlx::PgPool;

use super::{
    batch::{load_records, LoadError, PgBatchSink},
    payload::{decode_records, LoadBody, PayloadError},
};
use crate::api::response::{rejection_error, validation_error, ErrorResponse};
use crate::models::{Department, Employee, Entity, Job};

pub fn loads_routes(body_limit: usize) -> Router<PgPool> {
    Router::new()
        .route(EntityKind::Departments.load_path(), post(load_entities::<Department>))
        .route(EntityKind::Jobs.load_path(), post(load_entities::<Job>))
        .route(EntityKind::Employees.load_path(), post(load_entities::<Employee>))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Load a serialized record list in batches
///
/// # Response
///
/// - `200 OK` - `{"kind": .., "loaded": .., "batches": ..}`
/// - `400 Bad Request` - Malformed body or record; `details.committed` holds
///   the records that were stored before it
/// - `413 Payload Too Large` - Body exceeds the configured load limit
/// - `500 Internal Server Error` - A batch failed to commit
#[tracing::instrument(skip(pool, body), fields(kind = %E::KIND))]
async fn load_entities<E: Entity>(
    State(pool): State<PgPool>,
    body: Result<Json<LoadBody>, JsonRejection>,
) -> Result<Json<LoadSummary>, LoadApiError> {
    let Json(body) = body?;
    let records = decode_records(&body.into_records()?)?;

    let mut sink = PgBatchSink::new(pool);
    let summary = load_records::<E, _>(&mut sink, &records)
        .await
        .map_err(|source| LoadApiError::Load {
            kind: E::KIND,
            source,
        })?;

    Ok(Json(summary))
}

#[derive(Debug)]
enum LoadApiError {
    Body(JsonRejection),
    Payload(PayloadError),
    Load { kind: EntityKind, source: LoadError },
}

impl From<JsonRejection> for LoadApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Body(err)
    }
}

impl From<PayloadError> for LoadApiError {
    fn from(err: PayloadError) -> Self {
        Self::Payload(err)
    }
}

impl IntoResponse for LoadApiError {
    fn into_response(self) -> Response {
        match self {
            LoadApiError::Body(rejection) => rejection_error(
                rejection.status(),
                format!("Invalid load request: {}", rejection.body_text()),
            ),
            LoadApiError::Payload(err) => validation_error(err.to_string()),
            LoadApiError::Load {
                kind,
                source: source @ LoadError::InvalidRecord { position, committed, .. },
            } => ErrorResponse::with_details(
                "VALIDATION_ERROR",
                format!("Problem loading {}: {}", kind, source),
                json!({ "position": position, "committed": committed }),
            )
            .into_response_with(StatusCode::BAD_REQUEST),
            LoadApiError::Load {
                kind,
                source: source @ LoadError::Storage { .. },
            } => {
                tracing::error!("Bulk load of {} failed: {}", kind, source);
                ErrorResponse::with_details(
                    "STORAGE_ERROR",
                    format!("Problem loading {}: {}", kind, source),
                    json!({ "committed": source.committed() }),
                )
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_maps_to_bad_request() {
        let response = LoadApiError::Load {
            kind: EntityKind::Jobs,
            source: LoadError::InvalidRecord {
                position: 3,
                committed: 0,
                message: "missing field `job`".to_string(),
            },
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_failure_maps_to_internal_error() {
        let response = LoadApiError::Load {
            kind: EntityKind::Employees,
            source: LoadError::Storage {
                batch: 2,
                committed: 20,
                source: sqlx::Error::PoolTimedOut,
            },
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
