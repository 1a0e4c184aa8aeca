//! App access token command

use super::{client, expect_reply, success};
use crate::error::{CliError, CliResult};
use eventsub_config::EventSubSettings;

/// Exchange the client credentials for an app access token and print it.
pub async fn run(settings: &EventSubSettings) -> CliResult<()> {
    if settings.client_secret.is_none() {
        return Err(CliError::Config(
            "client_secret is required to request a token".to_string(),
        ));
    }

    let client = client(settings)?;
    let token = expect_reply(client.authenticate().await, "token exchange")?;

    success(&format!(
        "Got {} token, expires in {}s",
        token.token_type, token.expires_in
    ));
    println!("{}", token.access_token);
    Ok(())
}
