//! Per-call request context.
//!
//! Carries the correlation id of one inbound call through service, store and
//! enrichment client. Passed by reference; never stored globally.

use uuid::Uuid;

/// Context of a single inbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id, logged as `request_id` by every layer.
    pub request_id: Uuid,
}

impl RequestContext {
    /// Context with a fresh time-ordered request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
        }
    }

    /// Context for an id assigned upstream (e.g. the `x-request-id` header).
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self { request_id }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
