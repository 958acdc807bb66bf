//! Correlation id extractor.
//!
//! `SetRequestIdLayer` stamps every request with `x-request-id`; handlers
//! forward it into `CommandMetadata` so events can be traced to a request.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const FALLBACK: &str = "http-request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(FALLBACK);
        Ok(CorrelationId(id.to_string()))
    }
}
