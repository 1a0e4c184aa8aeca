//! Remote subscription records

use crate::{Condition, EventType, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status of a subscription as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Enabled,
    WebhookCallbackVerificationPending,
    WebhookCallbackVerificationFailed,
    NotificationFailuresExceeded,
    AuthorizationRevoked,
    ModeratorRemoved,
    UserRemoved,
    VersionRemoved,
    BetaMaintenance,
    /// A status introduced after this crate was written
    #[serde(other)]
    Other,
}

impl SubscriptionStatus {
    /// Wire value, as used in the `status` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::WebhookCallbackVerificationPending => "webhook_callback_verification_pending",
            Self::WebhookCallbackVerificationFailed => "webhook_callback_verification_failed",
            Self::NotificationFailuresExceeded => "notification_failures_exceeded",
            Self::AuthorizationRevoked => "authorization_revoked",
            Self::ModeratorRemoved => "moderator_removed",
            Self::UserRemoved => "user_removed",
            Self::VersionRemoved => "version_removed",
            Self::BetaMaintenance => "beta_maintenance",
            Self::Other => "other",
        }
    }

    /// Whether notifications are still being delivered
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Enabled | Self::WebhookCallbackVerificationPending)
    }
}

/// Delivery method of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMethod {
    #[default]
    Webhook,
    Websocket,
    Conduit,
    #[serde(other)]
    Other,
}

/// Transport descriptor of a subscription
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transport {
    pub method: TransportMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// Only sent when creating; the API never echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conduit_id: Option<String>,
}

impl Transport {
    /// Webhook transport with a callback URL and signing secret
    pub fn webhook(callback: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            method: TransportMethod::Webhook,
            callback: Some(callback.into()),
            secret: Some(secret.into()),
            session_id: None,
            conduit_id: None,
        }
    }
}

/// A subscription as stored by the remote service.
///
/// Only `type` is required. Other fields that are absent or malformed fall
/// back to their defaults; `condition` keeps whatever JSON was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub status: SubscriptionStatus,
    #[serde(rename = "type")]
    pub subscription_type: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub version: String,
    #[serde(default)]
    pub condition: Value,
    #[serde(default, deserialize_with = "lenient")]
    pub transport: Transport,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cost: u64,
}

/// Decode a field, falling back to the default when it has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Identifiers are strings on the wire; numbers are kept in their text form
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    })
}

impl Subscription {
    /// The subscription type, if it is a supported one
    pub fn event_type(&self) -> Option<EventType> {
        self.subscription_type.parse().ok()
    }

    /// Decode the condition into its typed shape
    pub fn typed_condition(&self) -> Result<Condition> {
        let event_type: EventType = self.subscription_type.parse()?;
        Condition::from_value(event_type, self.condition.clone())
    }
}
