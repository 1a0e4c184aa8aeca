//! Subscription client error types.

use thiserror::Error;

/// Result type for subscription client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Subscription client errors.
///
/// API calls never return these; they are logged. They surface only where a
/// caller has to act, such as building the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A base URL could not be joined with an endpoint path.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Token exchange requested without a client secret.
    #[error("Client secret is required for the app token exchange")]
    MissingClientSecret,

    /// Response error.
    #[error("Response error: {status} - {message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
