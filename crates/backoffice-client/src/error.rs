//! Error types for backend communication

use crate::envelope::DecodeError;
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown when the backend gives no usable explanation
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code
        status: u16,
        /// Message taken from the response body, if any
        message: Option<String>,
    },

    /// Response body did not match the declared envelope
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] DecodeError),

    /// Response body was not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client configuration is unusable
    #[error("Invalid client configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Request was refused before being sent
    #[error("Validation error: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// In-memory backend has no canned response for a path
    #[error("No route for {method} {path}")]
    NoRoute {
        /// HTTP method
        method: String,
        /// Request path
        path: String,
    },
}

impl ClientError {
    /// Create a status error
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if the backend refused our credentials
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Message suitable for an operator alert
    ///
    /// Prefers the server-provided message, falls back to a generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Validation { message } => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<ClientError> for backoffice_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status {
                status: 401 | 403,
                message,
            } => Self::Authentication(message.unwrap_or_else(|| "access denied".to_string())),
            ClientError::Decode(err) => Self::Decode(err.to_string()),
            ClientError::Validation { message } => Self::validation("request", message),
            ClientError::Configuration { message } => Self::Configuration { message },
            other => Self::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_error_display() {
        let err = ClientError::status(422, Some("Reason is required".to_string()));
        assert_eq!(err.to_string(), "Backend returned 422: Reason is required");

        let err = ClientError::status(500, None);
        assert_eq!(err.to_string(), "Backend returned 500: no message");
    }

    #[test]
    fn test_error_retryable() {
        assert!(ClientError::status(503, None).is_retryable());
        assert!(ClientError::status(429, None).is_retryable());
        assert!(!ClientError::status(404, None).is_retryable());
        assert!(!ClientError::validation("empty reason").is_retryable());
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::status(400, Some("Host already approved".to_string()));
        assert_eq!(err.user_message(), "Host already approved");

        let err = ClientError::status(500, None);
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_conversion_into_core_error() {
        let core: backoffice_core::Error = ClientError::status(401, None).into();
        assert!(matches!(core, backoffice_core::Error::Authentication(_)));

        let core: backoffice_core::Error = ClientError::status(500, None).into();
        assert!(matches!(core, backoffice_core::Error::Backend(_)));
    }
}
