//! Helix subscription client.

use eventsub_core::Condition;
use parking_lot::RwLock;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    ApiErrorBody, ApiReply, AppAccessToken, ClientConfig, ClientError, CreateSubscriptionRequest,
    ListFilter, Result, SubscriptionList,
};

const SUBSCRIPTIONS_PATH: &str = "eventsub/subscriptions";
const TOKEN_PATH: &str = "oauth2/token";

/// Client for the EventSub subscription endpoints.
///
/// Holds the client id, callback URL, webhook secret and the bearer token.
/// The token can be replaced at any time, e.g. after [`authenticate`](Self::authenticate).
pub struct SubscriptionClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl SubscriptionClient {
    /// Create a new client. Fails only if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let token = RwLock::new(config.access_token.clone());

        Ok(Self {
            http,
            config,
            token,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current bearer token.
    pub fn access_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Replace the bearer token.
    pub fn set_access_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Create a webhook subscription for a condition.
    ///
    /// Type and version are derived from the condition; the callback URL and
    /// secret come from the configuration.
    pub async fn create_subscription(
        &self,
        condition: Condition,
    ) -> Option<ApiReply<SubscriptionList>> {
        let body = CreateSubscriptionRequest::webhook(
            condition,
            self.config.callback_url.as_str(),
            self.config.webhook_secret.as_str(),
        );
        info!(event_type = %body.subscription_type, "Creating subscription");

        Self::settle("create_subscription", self.try_create(&body).await)
    }

    /// Delete a subscription. Failures are logged.
    pub async fn delete_subscription(&self, id: &str) {
        match self.try_delete(id).await {
            Ok(()) => info!(subscription_id = id, "Deleted subscription"),
            Err(e) => error!(
                operation = "delete_subscription",
                subscription_id = id,
                error = %e,
                "Helix request failed"
            ),
        }
    }

    /// List one page of subscriptions.
    pub async fn list_subscriptions(
        &self,
        filter: &ListFilter,
        after: Option<&str>,
    ) -> Option<ApiReply<SubscriptionList>> {
        Self::settle("list_subscriptions", self.try_list(filter, after).await)
    }

    /// List subscriptions across all pages.
    ///
    /// Totals are those of the last page. A failing page ends the walk with
    /// its reply.
    pub async fn list_all_subscriptions(
        &self,
        filter: &ListFilter,
    ) -> Option<ApiReply<SubscriptionList>> {
        let mut all = SubscriptionList::default();
        let mut after: Option<String> = None;

        loop {
            let page = match self.list_subscriptions(filter, after.as_deref()).await? {
                ApiReply::Success(page) => page,
                failure => return Some(failure),
            };

            let next = page.next_cursor().map(str::to_string);
            let empty = page.data.is_empty();
            all.total = page.total;
            all.total_cost = page.total_cost;
            all.max_total_cost = page.max_total_cost;
            all.data.extend(page.data);

            match next {
                Some(cursor) if !empty && after.as_deref() != Some(cursor.as_str()) => {
                    debug!(fetched = all.data.len(), "Fetching next subscription page");
                    after = Some(cursor);
                }
                _ => break,
            }
        }

        Some(ApiReply::Success(all))
    }

    /// Exchange the client credentials for an app access token.
    ///
    /// On success the token becomes the client's bearer token.
    pub async fn authenticate(&self) -> Option<ApiReply<AppAccessToken>> {
        let reply = Self::settle("authenticate", self.try_authenticate().await)?;

        if let ApiReply::Success(token) = &reply {
            self.set_access_token(token.access_token.clone());
            info!(expires_in = token.expires_in, "Obtained app access token");
        }
        Some(reply)
    }

    async fn try_create(
        &self,
        body: &CreateSubscriptionRequest,
    ) -> Result<ApiReply<SubscriptionList>> {
        let url = endpoint(&self.config.api_base_url, SUBSCRIPTIONS_PATH)?;
        self.send(self.authorized(self.http.post(url)).json(body))
            .await
    }

    async fn try_delete(&self, id: &str) -> Result<()> {
        let url = endpoint(&self.config.api_base_url, SUBSCRIPTIONS_PATH)?;
        let response = self
            .authorized(self.http.delete(url))
            .query(&[("id", id)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Response {
            status: status.as_u16(),
            message,
        })
    }

    async fn try_list(
        &self,
        filter: &ListFilter,
        after: Option<&str>,
    ) -> Result<ApiReply<SubscriptionList>> {
        let url = endpoint(&self.config.api_base_url, SUBSCRIPTIONS_PATH)?;

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(pair) = filter.query() {
            query.push(pair);
        }
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        self.send(self.authorized(self.http.get(url)).query(&query))
            .await
    }

    async fn try_authenticate(&self) -> Result<ApiReply<AppAccessToken>> {
        let secret = self
            .config
            .client_secret
            .as_deref()
            .ok_or(ClientError::MissingClientSecret)?;
        let url = endpoint(&self.config.auth_base_url, TOKEN_PATH)?;

        let request = self.http.post(url).query(&[
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", secret),
            ("grant_type", "client_credentials"),
        ]);
        self.send(request).await
    }

    /// Add `Client-Id` and the bearer token.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Client-Id", self.config.client_id.as_str());
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => {
                warn!("No access token set, sending request without authorization");
                request
            }
        }
    }

    /// Send a request and decode the success payload or the error body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiReply<T>> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = %status, bytes = bytes.len(), "Received Helix response");

        if status.is_success() {
            return Ok(ApiReply::Success(serde_json::from_slice(&bytes)?));
        }

        match serde_json::from_slice::<ApiErrorBody>(&bytes) {
            Ok(body) => Ok(ApiReply::Failure(body)),
            Err(_) => Err(ClientError::Response {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            }),
        }
    }

    /// Log the outcome; transport and decoding errors become `None`.
    fn settle<T>(operation: &'static str, result: Result<ApiReply<T>>) -> Option<ApiReply<T>> {
        match result {
            Ok(ApiReply::Failure(body)) => {
                error!(
                    operation,
                    status = body.status,
                    error = %body.error,
                    message = %body.message,
                    "Helix request failed"
                );
                Some(ApiReply::Failure(body))
            }
            Ok(reply) => Some(reply),
            Err(e) => {
                error!(operation, error = %e, "Helix request failed");
                None
            }
        }
    }
}

impl fmt::Debug for SubscriptionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionClient")
            .field("config", &self.config)
            .field("has_token", &self.token.read().is_some())
            .finish()
    }
}

/// Join a base URL and an endpoint path.
fn endpoint(base: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!("{}/{}", base.trim_end_matches('/'), path))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let url = endpoint("https://api.twitch.tv/helix/", SUBSCRIPTIONS_PATH).unwrap();
        assert_eq!(url.as_str(), "https://api.twitch.tv/helix/eventsub/subscriptions");

        let url = endpoint("https://id.twitch.tv", TOKEN_PATH).unwrap();
        assert_eq!(url.as_str(), "https://id.twitch.tv/oauth2/token");

        assert!(endpoint("not a url", TOKEN_PATH).is_err());
    }

    #[test]
    fn test_token_is_replaceable() {
        let config = ClientConfig::builder()
            .client_id("client")
            .access_token("first")
            .build();
        let client = SubscriptionClient::new(config).unwrap();

        assert_eq!(client.access_token().as_deref(), Some("first"));
        client.set_access_token("second");
        assert_eq!(client.access_token().as_deref(), Some("second"));
    }
}
