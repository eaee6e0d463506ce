//! Error Types

use thiserror::Error;

/// Default message when a quantity change is rejected without explanation
pub const DEFAULT_QUANTITY_FAILURE: &str = "Failed to update quantity";

/// Failure of a request to a packing-list endpoint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// fetch itself failed (offline, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// Server answered 2xx but flagged the operation as failed
    #[error("{0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no CSRF token available on the page")]
    MissingCsrfToken,
    #[error("could not build request body: {0}")]
    Body(String),
}

impl From<gloo_net::Error> for RequestError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => RequestError::Malformed(e.to_string()),
            other => RequestError::Network(other.to_string()),
        }
    }
}

/// Failure reading the page configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code() {
        assert_eq!(RequestError::Status(403).to_string(), "HTTP error! status: 403");
    }

    #[test]
    fn test_rejected_message_is_server_text() {
        let err = RequestError::Rejected("Quantity cannot go below 1".to_string());
        assert_eq!(err.to_string(), "Quantity cannot go below 1");
    }
}
