//! Error types for songbook.
//!
//! Every error carries exactly one [`ErrorKind`]. Wrapping an error with
//! call-site context (see [`ResultExt::context`]) never changes its kind, so
//! the transport layer can map kind → status without inspecting messages.

use thiserror::Error;

/// Result type alias using songbook's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message surfaced to callers for every `Internal` failure.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Closed set of failure kinds shared by all layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unexpected or environmental failure (storage, transport, serialization).
    Internal,
    /// Caller-supplied input is semantically invalid.
    BadRequest,
    /// Referenced entity does not exist.
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for songbook operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// An error wrapped with call-site context. Keeps the kind of `source`.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The failure kind of this error, looking through any context wrapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidInput(_) => ErrorKind::BadRequest,
            Error::Context { source, .. } => source.kind(),
            Error::Database(_)
            | Error::Request(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Wrap this error with call-site context.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Message that is safe to show to a caller.
    ///
    /// `BadRequest` and `NotFound` surface the root message verbatim;
    /// `Internal` always yields [`INTERNAL_MESSAGE`].
    pub fn public_message(&self) -> String {
        match (self.kind(), self.root()) {
            (ErrorKind::BadRequest, Error::InvalidInput(msg))
            | (ErrorKind::NotFound, Error::NotFound(msg)) => msg.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else {
            Error::Request(e.to_string())
        }
    }
}

/// Extension for attaching context to a `Result` without changing its kind.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("song not found".to_string());
        assert_eq!(err.to_string(), "Not found: song not found");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("negative limit".to_string());
        assert_eq!(err.to_string(), "Invalid input: negative limit");
    }

    #[test]
    fn test_error_display_context() {
        let err = Error::NotFound("song not found".to_string()).context("failed to get song text");
        assert_eq!(
            err.to_string(),
            "failed to get song text: Not found: song not found"
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::InvalidInput("x".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(Error::Request("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(Error::Serialization("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(Error::Internal("x".into()).kind(), ErrorKind::Internal);
        assert_eq!(
            Error::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_context_preserves_kind_through_nesting() {
        let err = Error::InvalidInput("api request failed".into())
            .context("failed to fetch song data")
            .context("failed to create song")
            .context("handler");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(matches!(err.root(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let res: Result<()> = Err(Error::NotFound("song not found".into()));
        let err = res.context("failed to get song text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_public_message_bad_request_is_verbatim() {
        let err = Error::InvalidInput("api request failed".into()).context("failed to create song");
        assert_eq!(err.public_message(), "api request failed");
    }

    #[test]
    fn test_public_message_not_found_is_verbatim() {
        let err = Error::NotFound("song not found".into()).context("get text");
        assert_eq!(err.public_message(), "song not found");
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = Error::Request("connection refused (10.0.0.3:5432)".into())
            .context("failed to fetch song data");
        assert_eq!(err.public_message(), INTERNAL_MESSAGE);
        assert!(err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_every_variant_has_one_kind() {
        let cases = [
            (Error::Database(sqlx::Error::PoolTimedOut), ErrorKind::Internal),
            (Error::NotFound("x".into()), ErrorKind::NotFound),
            (Error::InvalidInput("x".into()), ErrorKind::BadRequest),
            (Error::Serialization("x".into()), ErrorKind::Internal),
            (Error::Config("x".into()), ErrorKind::Internal),
            (Error::Internal("x".into()), ErrorKind::Internal),
        ];
        for (err, kind) in cases {
            // Adding a variant must extend this table.
            match &err {
                Error::Database(_)
                | Error::NotFound(_)
                | Error::InvalidInput(_)
                | Error::Request(_)
                | Error::Serialization(_)
                | Error::Config(_)
                | Error::Internal(_)
                | Error::Context { .. } => {}
            }
            assert_eq!(err.kind(), kind, "{}", err);
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::BadRequest.to_string(), "bad_request");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
    }
}
