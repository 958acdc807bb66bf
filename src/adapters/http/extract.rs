//! Request extractors whose rejections use the JSON error body.
//!
//! axum's own `Json`, `Path` and `Query` reject with plain text. These
//! wrappers turn malformed bodies, path segments and query strings into a
//! 400 `VALIDATION_FAILED` `ErrorResponse`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;
use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

fn malformed(kind: &str, detail: String) -> ApiError {
    tracing::debug!(kind, detail = %detail, "Rejected malformed request");
    ApiError(DomainError::new(ErrorCode::ValidationFailed, detail))
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        malformed("body", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        malformed("path", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        malformed("query", rejection.body_text())
    }
}
