// Application settings for EventSub webhooks and the Helix client

use crate::{ConfigError, ConfigLoader, ConfigValidator, EnvLoader, Result, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Prefix of the environment variables read by [`EventSubSettings::from_env`]
pub const ENV_PREFIX: &str = "EVENTSUB";

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://id.twitch.tv";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const REQUIRED: [&str; 3] = ["client_id", "callback_url", "webhook_secret"];

/// Settings shared by the webhook receiver and the subscription client.
///
/// Keys match the field names. From the environment they are read as
/// `EVENTSUB_<FIELD>`, e.g. `EVENTSUB_WEBHOOK_SECRET`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubSettings {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    pub callback_url: String,
    pub webhook_secret: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    #[serde(
        default = "default_request_timeout_secs",
        deserialize_with = "number_or_string"
    )]
    pub request_timeout_secs: u64,
}

impl EventSubSettings {
    /// Load from `EVENTSUB_*` environment variables
    pub fn from_env() -> Result<Self> {
        let env = EnvLoader::new(Some(ENV_PREFIX.to_string())).load()?;
        Self::from_map(env_values(env))
    }

    /// Load a `.env` file into the environment, then read it.
    ///
    /// Without a path a missing `.env` in the working directory is ignored.
    pub fn from_dotenv(path: Option<&Path>) -> Result<Self> {
        load_dotenv(path)?;
        Self::from_env()
    }

    /// Load from a JSON, TOML or `.env` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let values = ConfigLoader::auto(path)?.load_file(path)?;
        Self::from_map(values)
    }

    /// Layered loading: the file (if any), then a `.env` file, then the
    /// environment. Later layers override earlier ones.
    pub fn load(file: Option<&Path>, env_file: Option<&Path>) -> Result<Self> {
        let mut values = Map::new();
        if let Some(path) = file {
            values.extend(normalize(ConfigLoader::auto(path)?.load_file(path)?));
            tracing::debug!(path = %path.display(), "Loaded settings file");
        }

        load_dotenv(env_file)?;
        let env = EnvLoader::new(Some(ENV_PREFIX.to_string())).load()?;
        values.extend(env_values(env));

        Self::from_map(values)
    }

    /// Build from raw key/value pairs and validate.
    ///
    /// Keys are matched case-insensitively and may carry the `EVENTSUB_` prefix.
    pub fn from_map(values: Map<String, Value>) -> Result<Self> {
        let values = normalize(values);

        if let Some(missing) = REQUIRED.iter().find(|key| !values.contains_key(**key)) {
            return Err(ConfigError::KeyNotFound(missing.to_string()));
        }

        let settings: Self = serde_json::from_value(Value::Object(values))
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validate for EventSubSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.client_id, "client_id")?;
        ConfigValidator::is_https_url(&self.callback_url, "callback_url")?;
        // Twitch accepts secrets of 10 to 100 ASCII characters
        ConfigValidator::ascii_length(&self.webhook_secret, 10, 100, "webhook_secret")?;
        ConfigValidator::is_url(&self.api_base_url, "api_base_url")?;
        ConfigValidator::is_url(&self.auth_base_url, "auth_base_url")?;
        ConfigValidator::in_range(self.request_timeout_secs, 1, 300, "request_timeout_secs")?;
        Ok(())
    }
}

impl fmt::Debug for EventSubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("EventSubSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("access_token", &redacted(&self.access_token))
            .field("callback_url", &self.callback_url)
            .field("webhook_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Load a `.env` file into the process environment
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                ConfigError::LoadError(format!("Failed to load {}: {}", path.display(), e))
            })?;
        }
        None => {
            dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
        }
    }
    Ok(())
}

fn env_values(env: impl IntoIterator<Item = (String, String)>) -> Map<String, Value> {
    env.into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn normalize(values: Map<String, Value>) -> Map<String, Value> {
    let prefix = format!("{}_", ENV_PREFIX.to_lowercase());
    values
        .into_iter()
        .map(|(key, value)| {
            let key = key.to_lowercase();
            let key = key.strip_prefix(&prefix).map(str::to_string).unwrap_or(key);
            (key, value)
        })
        .collect()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Environment values arrive as strings, files may hold numbers
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
