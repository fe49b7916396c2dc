//! Error types for the moderation back-office

use std::{error::Error as StdError, fmt};

/// Main error type shared by the back-office crates
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Authentication error
    Authentication(String),

    /// Backend request error
    Backend(String),

    /// Response envelope or record could not be decoded
    Decode(String),

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Export error
    Export(String),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Backend(msg) => write!(f, "Backend error: {msg}"),
            Self::Decode(msg) => write!(f, "Decode error: {msg}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Export(msg) => write!(f, "Export error: {msg}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "session file missing");
        let app_error = Error::from(io_error);

        assert!(matches!(app_error, Error::Io(_)));
        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("rejection_reason", "must not be empty");

        assert_eq!(
            format!("{}", error),
            "Validation error: rejection_reason - must not be empty"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::configuration("base_url is not a valid URL");
        assert_eq!(
            format!("{}", error),
            "Configuration error: base_url is not a valid URL"
        );
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_all_error_display_variants() {
        let cases = vec![
            (Error::Authentication("no token".to_string()), "Authentication failed: no token"),
            (Error::Backend("500".to_string()), "Backend error: 500"),
            (Error::Decode("expected array".to_string()), "Decode error: expected array"),
            (
                Error::NotFound {
                    resource: "trip 7".to_string(),
                },
                "Resource not found: trip 7",
            ),
            (Error::Export("disk full".to_string()), "Export error: disk full"),
            (Error::Other("plain".to_string()), "plain"),
        ];

        for (error, expected) in cases {
            assert_eq!(format!("{}", error), expected);
        }
    }
}
