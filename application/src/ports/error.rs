//! Boundary error type shared by every port

use thiserror::Error;

/// Errors that can occur talking to an external boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// The boundary answered with an explicit error message
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Message suitable for surfacing to the user as-is.
    ///
    /// Backend-provided messages are returned verbatim.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected(message) => message.clone(),
            GatewayError::RequestFailed { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}
