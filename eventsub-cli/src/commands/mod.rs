//! Command implementations.

pub mod event_types;
pub mod sign;
pub mod subscriptions;
pub mod token;

use crate::error::{CliError, CliResult};
use colored::Colorize;
use eventsub_client::{ApiReply, ClientConfig, SubscriptionClient};
use eventsub_config::EventSubSettings;

/// Build the Helix client from loaded settings.
pub fn client(settings: &EventSubSettings) -> CliResult<SubscriptionClient> {
    let mut config = ClientConfig::builder()
        .client_id(settings.client_id.as_str())
        .callback_url(settings.callback_url.as_str())
        .webhook_secret(settings.webhook_secret.as_str())
        .api_base_url(settings.api_base_url.as_str())
        .auth_base_url(settings.auth_base_url.as_str())
        .timeout(settings.request_timeout());

    if let Some(secret) = &settings.client_secret {
        config = config.client_secret(secret.as_str());
    }
    if let Some(token) = &settings.access_token {
        config = config.access_token(token.as_str());
    }

    Ok(SubscriptionClient::new(config.build())?)
}

/// Get a token when none is configured but the credentials allow one.
pub async fn ensure_token(client: &SubscriptionClient) -> CliResult<()> {
    if client.access_token().is_some() {
        return Ok(());
    }
    if client.config().client_secret.is_none() {
        return Err(CliError::Config(
            "either access_token or client_secret must be set".to_string(),
        ));
    }
    expect_reply(client.authenticate().await, "token exchange").map(|_| ())
}

/// Turn a client reply into a result.
pub fn expect_reply<T>(reply: Option<ApiReply<T>>, what: &str) -> CliResult<T> {
    match reply {
        Some(ApiReply::Success(value)) => Ok(value),
        Some(ApiReply::Failure(body)) => Err(body.into()),
        None => Err(CliError::Api(format!("{} got no usable response", what))),
    }
}

pub fn success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

pub fn info(msg: &str) {
    println!("  {} {}", "→".cyan(), msg);
}
