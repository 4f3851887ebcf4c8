//! Error types for the rifa REST client

use thiserror::Error;

/// Errors that can occur when talking to the rifa backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the underlying HTTP client failed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// HTTP request failed before a response was received
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Session is missing or expired (HTTP 401)
    ///
    /// Distinguished from [`ApiError::Api`] so callers can redirect to the
    /// public landing route instead of rendering an inline message.
    #[error("Unauthorized - session missing or expired")]
    Unauthorized,

    /// Backend returned a non-2xx status
    ///
    /// The body text is carried verbatim as the error detail.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the backend body
        message: String,
    },
}

impl ApiError {
    /// Whether this error means the session is gone
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
