//! `GET /kpi/:n?year=YYYY`

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use super::{
    report::{KpiReport, DEFAULT_YEAR},
    run::{KpiError, KpiResponse},
};
use crate::api::response::{rejection_error, storage_error, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
pub struct KpiParams {
    pub year: Option<i32>,
}

pub fn kpi_routes() -> Router<PgPool> {
    Router::new().route("/kpi/:n", get(run_kpi))
}

#[tracing::instrument(skip(pool, params))]
async fn run_kpi(
    State(pool): State<PgPool>,
    Path(n): Path<String>,
    params: Result<Query<KpiParams>, QueryRejection>,
) -> Result<Json<KpiResponse>, KpiApiError> {
    let Query(params) = params?;

    let report = n
        .parse()
        .ok()
        .and_then(KpiReport::from_number)
        .ok_or_else(|| KpiError::NotFound(n.clone()))?;

    let response =
        super::run::handle(pool, report, params.year.unwrap_or(DEFAULT_YEAR)).await?;

    Ok(Json(response))
}

#[derive(Debug)]
enum KpiApiError {
    Params(QueryRejection),
    Report(KpiError),
}

impl From<QueryRejection> for KpiApiError {
    fn from(err: QueryRejection) -> Self {
        Self::Params(err)
    }
}

impl From<KpiError> for KpiApiError {
    fn from(err: KpiError) -> Self {
        Self::Report(err)
    }
}

impl IntoResponse for KpiApiError {
    fn into_response(self) -> Response {
        match self {
            KpiApiError::Params(rejection) => {
                rejection_error(rejection.status(), rejection.body_text())
            },
            KpiApiError::Report(err @ KpiError::NotFound(_)) => {
                ErrorResponse::new("NOT_FOUND", err.to_string())
                    .into_response_with(StatusCode::NOT_FOUND)
            },
            KpiApiError::Report(err @ KpiError::Timeout) => {
                ErrorResponse::new("TIMEOUT_ERROR", err.to_string())
                    .into_response_with(StatusCode::GATEWAY_TIMEOUT)
            },
            KpiApiError::Report(err @ KpiError::Database(_)) => {
                tracing::error!("Database error during KPI report: {}", err);
                storage_error(err.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let response = KpiApiError::from(KpiError::Timeout).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let response = KpiApiError::from(KpiError::NotFound("7".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            KpiApiError::from(KpiError::Database(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
