//! Error types for panel operations

use backoffice_client::{ClientError, GENERIC_FAILURE};
use thiserror::Error;

/// Result type alias for panel operations
pub type PanelResult<T> = Result<T, PanelError>;

/// Errors surfaced to the operator by a panel
#[derive(Error, Debug)]
pub enum PanelError {
    /// Backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Form input is incomplete or invalid; nothing was sent
    #[error("{field}: {message}")]
    InvalidInput {
        /// Field or step that failed
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// The action does not apply to this record in its current state
    #[error("{action} is not available for this record")]
    ActionUnavailable {
        /// Action name
        action: String,
    },

    /// No record with this id in the current view
    #[error("record {id} not found")]
    NotFound {
        /// Record id
        id: String,
    },

    /// Export could not be written
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    /// I/O failure while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// Create an invalid-input error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an action-unavailable error
    pub fn unavailable(action: impl Into<String>) -> Self {
        Self::ActionUnavailable {
            action: action.into(),
        }
    }

    /// Message shown in the operator alert
    ///
    /// Backend failures show the server message or a generic fallback.
    pub fn alert(&self) -> String {
        match self {
            Self::Client(err) => err.user_message(),
            Self::Io(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<PanelError> for backoffice_core::Error {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::Client(err) => err.into(),
            PanelError::InvalidInput { field, message } => Self::Validation { field, message },
            PanelError::NotFound { id } => Self::NotFound { resource: id },
            PanelError::Export(err) => Self::Export(err.to_string()),
            PanelError::Io(err) => Self::Io(err),
            other @ PanelError::ActionUnavailable { .. } => Self::Other(other.to_string()),
        }
    }
}
