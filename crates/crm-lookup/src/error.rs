//! Error types for candidate lookups.

use thiserror::Error;

/// Errors that can occur while looking up candidates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// Network request failed (connection, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The lookup service answered with a non-success HTTP status.
    #[error("lookup service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The envelope reported `success: false`.
    #[error("lookup service rejected the request: {0}")]
    Rejected(String),

    /// The envelope parsed but did not carry the expected payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Failed to parse JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The lookup settings cannot produce a usable endpoint.
    #[error("invalid lookup configuration: {0}")]
    InvalidConfig(String),

    /// No record exists for the requested identifier.
    #[error("no record found for id {0}")]
    NotFound(String),
}

impl LookupError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the server. Please check your connection.",
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "You are not allowed to search this list. Please sign in again."
            }
            Self::Status { .. } | Self::Rejected(_) => "The server could not complete the search.",
            Self::NotFound(_) => "The selected record no longer exists.",
            Self::InvalidConfig(_) => "Search is not configured correctly.",
            Self::MalformedResponse(_) | Self::JsonParse(_) => "An unexpected error occurred.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
