//! Subscription client configuration.

use std::fmt;
use std::time::Duration;

/// Helix API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";

/// Twitch OAuth base URL.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://id.twitch.tv";

/// Subscription client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Application client id, sent as `Client-Id`.
    pub client_id: String,
    /// Client secret, needed only for the app token exchange.
    pub client_secret: Option<String>,
    /// Bearer token to start with.
    pub access_token: Option<String>,
    /// Callback URL registered on new subscriptions.
    pub callback_url: String,
    /// Secret Twitch signs callbacks with.
    pub webhook_secret: String,
    /// Helix API base URL.
    pub api_base_url: String,
    /// OAuth base URL.
    pub auth_base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            access_token: None,
            callback_url: String::new(),
            webhook_secret: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("eventsub-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("callback_url", &self.callback_url)
            .field("webhook_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for subscription client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = client_id.into();
        self
    }

    /// Set the client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.config.client_secret = Some(client_secret.into());
        self
    }

    /// Set an existing access token.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.config.access_token = Some(access_token.into());
        self
    }

    /// Set the callback URL.
    pub fn callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.config.callback_url = callback_url.into();
        self
    }

    /// Set the webhook secret.
    pub fn webhook_secret(mut self, webhook_secret: impl Into<String>) -> Self {
        self.config.webhook_secret = webhook_secret.into();
        self
    }

    /// Set the Helix API base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Set the OAuth base URL.
    pub fn auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.auth_base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
