//! Error types and handling.

use reqwest::StatusCode;
use thiserror::Error;

/// Error surfaced by every gateway operation.
///
/// Only two kinds exist so the caller can map them without knowing anything
/// about the upstream transport.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Upstream reports the employee does not exist
    #[error("Employee not found with id: {0}")]
    NotFound(String),

    /// Any other failure, after the retry budget was spent where applicable
    #[error("{message}")]
    UpstreamFailure {
        message: String,
        #[source]
        source: Option<UpstreamError>,
    },
}

/// Result type alias for GatewayError
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Create a not found error for the given employee id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an upstream failure wrapping the last underlying cause
    pub fn upstream(message: impl Into<String>, source: UpstreamError) -> Self {
        Self::UpstreamFailure {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Whether this error means the resource is absent (not a fault).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Why a single upstream exchange failed.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, timeout or body transfer failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream responded with status {0}")]
    Status(StatusCode),

    /// Response body was not a valid envelope
    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Success status but the envelope carried no data
    #[error("Upstream response is missing data")]
    MissingData,

    /// Configured base URL cannot be used
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_message() {
        let err = GatewayError::not_found("abc-123");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Employee not found with id: abc-123");
    }

    #[test]
    fn test_upstream_failure_keeps_cause() {
        let err = GatewayError::upstream(
            "Failed to fetch employees",
            UpstreamError::Status(StatusCode::TOO_MANY_REQUESTS),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Failed to fetch employees");

        let cause = err.source().map(ToString::to_string);
        assert_eq!(
            cause.as_deref(),
            Some("Upstream responded with status 429 Too Many Requests")
        );
    }
}
