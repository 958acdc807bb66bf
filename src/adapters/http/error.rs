//! Error body shared by every endpoint and the `DomainError` to status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body.
///
/// Field validation failures carry `details.errors = { field: [messages] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new("UNAUTHENTICATED", "Authentication required")
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "An unexpected error occurred")
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound | ErrorCode::PostNotFound | ErrorCode::NotificationNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::EmailTaken | ErrorCode::UsernameTaken => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wraps a `DomainError` so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.code());

        if status.is_server_error() {
            tracing::error!(code = %err.code(), error = %err.message(), "Request failed");
            return (status, Json(ErrorResponse::internal())).into_response();
        }

        let mut body = ErrorResponse::new(err.code().to_string(), err.message());
        if !err.field_errors.is_empty() {
            body = body.with_details(json!({ "errors": err.field_errors }));
        }
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::PostNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::EmailTaken), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn field_errors_are_reported_under_details() {
        let err = DomainError::validation("password", "Password must be at least 6 characters");
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(
            body["details"]["errors"]["password"][0],
            "Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn server_errors_hide_the_cause() {
        let err = DomainError::database("Failed to fetch user", "connection refused");
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("connection"));
        assert!(body.get("details").is_none());
    }
}
