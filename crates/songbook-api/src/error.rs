//! HTTP error mapping.
//!
//! Status codes derive from [`ErrorKind`] alone. `Internal` failures are
//! logged with the full chain and answered with a generic message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use songbook_core::{Error, ErrorKind};

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// Failure raised by the catalog or a lower layer.
    Catalog(Error),
    /// Malformed request (query, path, or body) rejected before the catalog.
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(err) => status_for(err.kind()),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Catalog(err) => {
                if err.kind() == ErrorKind::Internal {
                    error!(
                        subsystem = "api",
                        error_kind = err.kind().as_str(),
                        error = %err,
                        "Request failed"
                    );
                } else {
                    debug!(
                        subsystem = "api",
                        error_kind = err.kind().as_str(),
                        error = %err,
                        "Request rejected"
                    );
                }
                err.public_message()
            }
            ApiError::BadRequest(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
