//! Error types for webhook operations

use crate::WebhookResponse;
use std::time::Duration;
use thiserror::Error;

/// Reasons an incoming callback is rejected.
///
/// The display strings are the `error` messages sent back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// Message id or timestamp header missing
    #[error("missing id/timestamp headers")]
    MissingIdOrTimestamp,

    /// Signature header missing
    #[error("missing signature header")]
    SignatureMissing,

    /// Message type header missing
    #[error("missing message-type header")]
    MessageTypeMissing,

    /// Body is not UTF-8 JSON, or not the expected envelope
    #[error("invalid JSON body")]
    InvalidJson,

    /// Signature verification failed
    #[error("invalid signature")]
    SignatureInvalid,

    /// Timestamp could not be parsed or is outside the configured tolerance
    #[error("message timestamp outside tolerance")]
    TimestampInvalid,

    /// Verification request without a challenge
    #[error("missing challenge")]
    MissingChallenge,

    /// Unrecognized message type header value
    #[error("invalid message type: {0}")]
    InvalidMessageType(String),
}

impl WebhookError {
    /// HTTP status reported for this rejection
    pub fn status(&self) -> u16 {
        match self {
            Self::SignatureInvalid | Self::TimestampInvalid => 401,
            _ => 400,
        }
    }

    /// Build the JSON error response for this rejection
    pub fn into_response(self) -> WebhookResponse {
        WebhookResponse::error(self.status(), self.to_string())
    }
}

/// Errors raised by notification handlers
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler reported a failure
    #[error("Handler failed: {0}")]
    Failed(String),

    /// Handler group did not finish in time
    #[error("Handlers timed out after {0:?}")]
    Timeout(Duration),

    /// Any other error raised inside a handler
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Create a failure with a message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
