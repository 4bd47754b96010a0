//! Server-level error types
//!
//! Feature slices map their own errors to responses. The types here cover
//! what sits outside any slice: startup failures and the service endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::db::DbError;

/// Result type alias for server startup and shutdown
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors surfaced by the service-level endpoints
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database unavailable: {0}")]
    Unavailable(#[from] DbError),

    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::Unavailable(ref e) => {
                tracing::error!("Database health check failed: {:?}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            },
            AppError::RouteNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        ErrorResponse::new(code, self.to_string()).into_response_with(status)
    }
}

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_statuses() {
        let response = AppError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::RouteNotFound {
            method: "GET".to_string(),
            path: "/nowhere".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_error_display() {
        let err = ServerError::Config("invalid listen address".to_string());
        assert_eq!(err.to_string(), "Configuration error: invalid listen address");
    }
}
