//! Request bodies and query filters.

use eventsub_core::{Condition, EventType, SubscriptionStatus, Transport};
use serde::Serialize;

/// Body of `POST eventsub/subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSubscriptionRequest {
    #[serde(rename = "type")]
    pub subscription_type: EventType,
    pub version: &'static str,
    pub condition: Condition,
    pub transport: Transport,
}

impl CreateSubscriptionRequest {
    /// Webhook subscription for a condition; type and version follow from it.
    pub fn webhook(
        condition: Condition,
        callback: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let subscription_type = condition.event_type();
        Self {
            subscription_type,
            version: subscription_type.version(),
            condition,
            transport: Transport::webhook(callback, secret),
        }
    }
}

/// Filter for listing subscriptions. Helix accepts at most one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListFilter {
    #[default]
    All,
    Status(SubscriptionStatus),
    Type(EventType),
    UserId(String),
}

impl ListFilter {
    /// Query parameter for this filter.
    pub fn query(&self) -> Option<(&'static str, String)> {
        match self {
            Self::All => None,
            Self::Status(status) => Some(("status", status.as_str().to_string())),
            Self::Type(event_type) => Some(("type", event_type.as_str().to_string())),
            Self::UserId(user_id) => Some(("user_id", user_id.clone())),
        }
    }
}
