//! Error types for the PayPal client.

use thiserror::Error;

/// Result type for PayPal client operations.
pub type Result<T> = std::result::Result<T, PayPalError>;

/// PayPal client errors.
#[derive(Debug, Error)]
pub enum PayPalError {
    /// Credentials rejected or expired, or no token held yet
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Payload rejected by the provider (400 / 422)
    #[error("Validation error ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Unknown invoice (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (connection failed, timeout, undecodable body)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other non-2xx response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid client configuration (empty client id or secret)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PayPalError {
    /// True for failures of the transport itself rather than a classified
    /// provider rejection.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Api { .. })
    }

    /// Map a non-2xx provider response onto the error taxonomy.
    pub(crate) fn from_status(status: reqwest::StatusCode, path: &str, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Authentication(body),
            400 | 422 => Self::Validation {
                status: status.as_u16(),
                message: body,
            },
            404 => Self::NotFound(path.to_string()),
            code => Self::Api {
                status: code,
                message: body,
            },
        }
    }
}
