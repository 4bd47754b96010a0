//! API response types
//!
//! Successful responses carry the resource itself. Failures use one
//! structured body across every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an error response with details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Pair the body with a status code
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Shorthand for the validation error every feature returns on bad input
pub fn validation_error(message: impl Into<String>) -> Response {
    ErrorResponse::new("VALIDATION_ERROR", message).into_response_with(StatusCode::BAD_REQUEST)
}

/// Shorthand for a storage failure; the cause is part of the message
pub fn storage_error(message: impl Into<String>) -> Response {
    ErrorResponse::new("STORAGE_ERROR", message)
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Shape an extractor rejection into the error body, keeping its status
///
/// Body data errors (422) join the other invalid input under 400; size and
/// content-type rejections keep 413 and 415.
pub fn rejection_error(status: StatusCode, message: impl Into<String>) -> Response {
    let (status, code) = match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        },
        StatusCode::PAYLOAD_TOO_LARGE => (status, "PAYLOAD_TOO_LARGE"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => (status, "UNSUPPORTED_MEDIA_TYPE"),
        _ if status.is_server_error() => (status, "INTERNAL_ERROR"),
        _ => (status, "BAD_REQUEST"),
    };
    ErrorResponse::new(code, message).into_response_with(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "Job not found. Id: 3"))
            .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Job not found. Id: 3");
        assert!(body["error"].get("details").is_none());
    }

    #[test]
    fn test_with_details() {
        let body = ErrorResponse::with_details(
            "STORAGE_ERROR",
            "load aborted",
            serde_json::json!({"committed": 20}),
        );
        assert_eq!(body.error.details.unwrap()["committed"], 20);
    }

    #[test]
    fn test_shorthand_statuses() {
        assert_eq!(validation_error("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(storage_error("down").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rejection_error_keeps_status() {
        assert_eq!(
            rejection_error(StatusCode::UNPROCESSABLE_ENTITY, "missing field").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            rejection_error(StatusCode::PAYLOAD_TOO_LARGE, "too big").status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            rejection_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "no content type").status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
