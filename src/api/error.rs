//! API Error Types
//!
//! Failures talking to the expense backend.

use thiserror::Error;

/// API error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; displays the body as the server sent it
    #[error("{body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be assembled
    #[error("Request build error: {0}")]
    Request(String),
}

impl ApiError {
    /// Build a status error, substituting the status line for an empty body
    pub fn from_status(status: u16, body: String) -> Self {
        let body = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };
        ApiError::Status { status, body }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_displays_body_verbatim() {
        let err = ApiError::from_status(422, "bad image".to_string());
        assert_eq!(err.to_string(), "bad image");
        assert!(matches!(err, ApiError::Status { status: 422, .. }));
    }

    #[test]
    fn test_empty_status_body_uses_code() {
        let err = ApiError::from_status(502, "  ".to_string());
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_network_error_display() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.to_string(), "Network error: TypeError: Failed to fetch");
        assert!(!matches!(err, ApiError::Status { .. }));
    }
}
