//! Error types for QueryDesk
//!
//! Request failures, storage failures and configuration problems share one enum.
//! The controller collapses request failures into a per-flow outcome, so most of
//! these never reach the user verbatim.

use thiserror::Error;

/// Main error type for QueryDesk operations
#[derive(Error, Debug)]
pub enum QueryDeskError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// User-facing outcome of a failed search, already worded for display
    #[error("{0}")]
    SearchFailed(String),
}

/// Result type alias for QueryDesk operations
pub type Result<T> = std::result::Result<T, QueryDeskError>;

impl QueryDeskError {
    /// Check if this error came from a call to the search API
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            QueryDeskError::Network(_)
                | QueryDeskError::Status(_)
                | QueryDeskError::MalformedResponse(_)
        )
    }
}

impl From<ureq::Error> for QueryDeskError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => QueryDeskError::Status(code),
            other => QueryDeskError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_are_classified() {
        assert!(QueryDeskError::Network("refused".into()).is_request_failure());
        assert!(QueryDeskError::Status(500).is_request_failure());
        assert!(QueryDeskError::MalformedResponse("x".into()).is_request_failure());
        assert!(!QueryDeskError::Storage("disk".into()).is_request_failure());
        assert!(!QueryDeskError::InvalidConfig("url".into()).is_request_failure());
    }

    #[test]
    fn status_error_mentions_code() {
        assert_eq!(
            QueryDeskError::Status(503).to_string(),
            "Server responded with status 503"
        );
    }

    #[test]
    fn search_failure_displays_message_only() {
        let err = QueryDeskError::SearchFailed("An error occurred while searching.".into());
        assert_eq!(err.to_string(), "An error occurred while searching.");
        assert!(!err.is_request_failure());
    }
}
