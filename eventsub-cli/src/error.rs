//! Error types for the EventSub CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Settings could not be loaded or are invalid
    Config(String),

    /// The HTTP client could not be built
    Client(String),

    /// The API rejected a request or did not answer
    Api(String),

    /// Invalid argument
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Client(msg) => write!(f, "Client error: {}", msg),
            CliError::Api(msg) => write!(f, "API error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<eventsub_config::ConfigError> for CliError {
    fn from(e: eventsub_config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<eventsub_client::ClientError> for CliError {
    fn from(e: eventsub_client::ClientError) -> Self {
        CliError::Client(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidArgument(e.to_string())
    }
}

impl From<eventsub_core::SchemaError> for CliError {
    fn from(e: eventsub_core::SchemaError) -> Self {
        CliError::InvalidArgument(e.to_string())
    }
}

impl From<eventsub_client::ApiErrorBody> for CliError {
    fn from(body: eventsub_client::ApiErrorBody) -> Self {
        CliError::Api(format!("{} {}: {}", body.status, body.error, body.message))
    }
}
