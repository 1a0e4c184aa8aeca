//! Error types for schema operations

use thiserror::Error;

/// Errors raised while interpreting EventSub data
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The subscription type is not one this crate knows about
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// A required field was absent from the message body
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The JSON did not match the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
