//! Request extractors that reject with [`ApiError`] instead of plain text.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use tower_http::request_id::RequestId;
use uuid::Uuid;

use songbook_core::RequestContext;

use crate::error::ApiError;

/// JSON body; malformed bodies become a 400 `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string; undecodable queries become a 400 `{"error": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters; mismatched segments become a 400 `{"error": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Per-call context built from the `x-request-id` assigned by the
/// request-id middleware.
///
/// The router replaces non-UUID headers before this runs; outside the router
/// a missing or unparseable id falls back to a fresh one.
#[derive(Debug, Clone, Copy)]
pub struct Correlation(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Correlation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(RequestContext::with_request_id)
            .unwrap_or_default();
        Ok(Correlation(ctx))
    }
}
