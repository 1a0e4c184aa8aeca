//! Message bodies received on the webhook callback

use crate::{Event, EventType, Result, SchemaError, Subscription};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed `notification` message.
///
/// Holds the subscription snapshot, the typed event and the body exactly as
/// it was parsed, so fields this crate does not model remain reachable.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subscription: Subscription,
    pub event: Event,
    pub raw: Value,
}

impl Notification {
    /// Interpret a parsed webhook body as a notification
    pub fn from_value(raw: Value) -> Result<Self> {
        let subscription = raw
            .get("subscription")
            .cloned()
            .ok_or(SchemaError::MissingField("subscription"))?;
        let subscription: Subscription = serde_json::from_value(subscription)?;

        let payload = raw.get("event").cloned().unwrap_or(Value::Null);
        let event = Event::from_value(&subscription.subscription_type, payload);

        Ok(Self {
            subscription,
            event,
            raw,
        })
    }

    /// Subscription type name as sent by the service
    pub fn event_type_name(&self) -> &str {
        &self.subscription.subscription_type
    }

    /// Subscription type, if supported
    pub fn event_type(&self) -> Option<EventType> {
        self.subscription.event_type()
    }
}

/// Body of a `revocation` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revocation {
    pub subscription: Subscription,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn follow_body() -> Value {
        json!({
            "subscription": {
                "id": "f1c2a387-161a-49f9-a165-0f21d7a4e1c4",
                "type": "channel.follow",
                "version": "2",
                "status": "enabled",
                "cost": 0,
                "condition": {"broadcaster_user_id": "1337", "moderator_user_id": "1337"},
                "transport": {"method": "webhook", "callback": "https://example.com/webhooks/callback"},
                "created_at": "2019-11-16T10:11:12.634234626Z"
            },
            "event": {
                "user_id": "1234",
                "user_login": "cool_user",
                "user_name": "Cool_User",
                "broadcaster_user_id": "1337",
                "broadcaster_user_login": "cooler_user",
                "broadcaster_user_name": "Cooler_User",
                "followed_at": "2020-07-15T18:16:11.17106713Z"
            }
        })
    }

    #[test]
    fn test_typed_notification() {
        let notification = Notification::from_value(follow_body()).unwrap();
        assert_eq!(notification.event_type(), Some(EventType::ChannelFollow));
        assert_eq!(notification.event_type_name(), "channel.follow");

        match &notification.event {
            Event::ChannelFollow(follow) => {
                assert_eq!(follow.user_login, "cool_user");
                assert_eq!(follow.broadcaster_user_id, "1337");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(notification.raw, follow_body());
    }

    #[test]
    fn test_missing_subscription() {
        let result = Notification::from_value(json!({"event": {}}));
        assert!(matches!(result, Err(SchemaError::MissingField("subscription"))));
    }

    #[test]
    fn test_sparse_subscription() {
        let mut body = follow_body();
        body["subscription"] = json!({"type": "channel.follow", "id": 42, "cost": -1});

        let notification = Notification::from_value(body).unwrap();
        assert_eq!(notification.subscription.id, "42");
        assert_eq!(notification.subscription.cost, 0);
        assert!(matches!(notification.event, Event::ChannelFollow(_)));

        let mut body = follow_body();
        body["subscription"] = json!({"id": "1", "type": null});
        assert!(matches!(
            Notification::from_value(body),
            Err(SchemaError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_missing_event_is_unrecognized() {
        let mut body = follow_body();
        body.as_object_mut().unwrap().remove("event");

        let notification = Notification::from_value(body).unwrap();
        assert!(matches!(
            notification.event,
            Event::Unrecognized { payload: Value::Null, .. }
        ));
    }
}
