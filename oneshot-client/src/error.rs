//! Error types for the job-control client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the job-control API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote call itself failed (transport, throttling, service error)
    #[error("{operation} failed: {message}")]
    Api {
        /// Name of the remote operation, e.g. "DescribeTasks"
        operation: &'static str,
        /// Error message including the full source chain
        message: String,
    },

    /// The request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error for the given operation
    pub fn api(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            message: message.into(),
        }
    }

    /// Name of the failed remote operation, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Api { operation, .. } => Some(operation),
            Self::InvalidRequest(_) => None,
        }
    }
}
