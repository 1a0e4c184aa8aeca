//! The table of supported subscription types
//!
//! Each row names the enum variant, the wire name, the subscription version,
//! the condition shape and the payload shape. [`EventType`], [`Condition`]
//! and [`Event`] are generated from this single table, so adding a type is a
//! one-line change and every `match` over them stays exhaustive.

use crate::condition::{
    BroadcasterCondition, ChatCondition, ModeratedCondition, RaidCondition, RewardCondition,
    UserCondition,
};
use crate::events::*;
use crate::{Result, SchemaError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

macro_rules! event_schema {
    (
        $(
            $(#[$doc:meta])*
            $variant:ident => $name:literal, $version:literal, $condition:ty, $event:ty;
        )+
    ) => {
        /// A subscription type supported by this crate
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventType {
            $( $(#[$doc])* $variant, )+
        }

        impl EventType {
            /// Every supported type, in declaration order
            pub const ALL: &'static [EventType] = &[$(EventType::$variant),+];

            /// Wire name, e.g. `channel.follow`
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(EventType::$variant => $name,)+
                }
            }

            /// Subscription version to request for this type
            pub const fn version(&self) -> &'static str {
                match self {
                    $(EventType::$variant => $version,)+
                }
            }
        }

        impl FromStr for EventType {
            type Err = SchemaError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($name => Ok(EventType::$variant),)+
                    other => Err(SchemaError::UnknownEventType(other.to_string())),
                }
            }
        }

        /// Filter parameters for creating a subscription, one shape per type
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Condition {
            $( $variant($condition), )+
        }

        impl Condition {
            /// The subscription type this condition belongs to
            pub fn event_type(&self) -> EventType {
                match self {
                    $(Condition::$variant(_) => EventType::$variant,)+
                }
            }

            /// Decode a condition object received from the API
            pub fn from_value(event_type: EventType, value: Value) -> Result<Self> {
                let condition = match event_type {
                    $(EventType::$variant => Condition::$variant(serde_json::from_value(value)?),)+
                };
                Ok(condition)
            }
        }

        impl Serialize for Condition {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                match self {
                    $(Condition::$variant(condition) => condition.serialize(serializer),)+
                }
            }
        }

        /// Payload of a notification, one shape per type
        #[derive(Debug, Clone, PartialEq)]
        pub enum Event {
            $( $variant($event), )+
            /// A type this crate does not know, or a payload that did not
            /// match the known shape. The JSON is kept as received.
            Unrecognized { event_type: String, payload: Value },
        }

        impl Event {
            /// The subscription type, if it is a supported one
            pub fn event_type(&self) -> Option<EventType> {
                match self {
                    $(Event::$variant(_) => Some(EventType::$variant),)+
                    Event::Unrecognized { event_type, .. } => event_type.parse().ok(),
                }
            }

            /// Decode the `event` object of a notification.
            ///
            /// Never fails: anything that cannot be typed becomes
            /// [`Event::Unrecognized`].
            pub fn from_value(event_type: &str, payload: Value) -> Self {
                let Ok(kind) = event_type.parse::<EventType>() else {
                    return Event::Unrecognized {
                        event_type: event_type.to_string(),
                        payload,
                    };
                };

                let decoded = match kind {
                    $(EventType::$variant => serde_json::from_value(payload.clone()).map(Event::$variant),)+
                };

                decoded.unwrap_or_else(|err| {
                    tracing::warn!(
                        event_type,
                        error = %err,
                        "Event payload did not match the known schema"
                    );
                    Event::Unrecognized {
                        event_type: event_type.to_string(),
                        payload,
                    }
                })
            }
        }

        impl Serialize for Event {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                match self {
                    $(Event::$variant(event) => event.serialize(serializer),)+
                    Event::Unrecognized { payload, .. } => payload.serialize(serializer),
                }
            }
        }
    };
}

event_schema! {
    ChannelUpdate => "channel.update", "2", BroadcasterCondition, ChannelUpdateEvent;
    ChannelFollow => "channel.follow", "2", ModeratedCondition, ChannelFollowEvent;
    ChannelSubscribe => "channel.subscribe", "1", BroadcasterCondition, ChannelSubscribeEvent;
    ChannelSubscriptionEnd => "channel.subscription.end", "1", BroadcasterCondition, ChannelSubscribeEvent;
    ChannelSubscriptionGift => "channel.subscription.gift", "1", BroadcasterCondition, ChannelSubscriptionGiftEvent;
    ChannelSubscriptionMessage => "channel.subscription.message", "1", BroadcasterCondition, ChannelSubscriptionMessageEvent;
    ChannelCheer => "channel.cheer", "1", BroadcasterCondition, ChannelCheerEvent;
    ChannelRaid => "channel.raid", "1", RaidCondition, ChannelRaidEvent;
    ChannelBan => "channel.ban", "1", BroadcasterCondition, ChannelBanEvent;
    ChannelUnban => "channel.unban", "1", BroadcasterCondition, ChannelUnbanEvent;
    ChannelModeratorAdd => "channel.moderator.add", "1", BroadcasterCondition, ChannelModeratorEvent;
    ChannelModeratorRemove => "channel.moderator.remove", "1", BroadcasterCondition, ChannelModeratorEvent;
    /// Custom channel points reward redeemed
    ChannelPointsRedemptionAdd => "channel.channel_points_custom_reward_redemption.add", "1", RewardCondition, ChannelPointsRedemptionEvent;
    ChannelAdBreakBegin => "channel.ad_break.begin", "1", BroadcasterCondition, ChannelAdBreakBeginEvent;
    ChannelChatMessage => "channel.chat.message", "1", ChatCondition, ChannelChatMessageEvent;
    StreamOnline => "stream.online", "1", BroadcasterCondition, StreamOnlineEvent;
    StreamOffline => "stream.offline", "1", BroadcasterCondition, StreamOfflineEvent;
    UserUpdate => "user.update", "1", UserCondition, UserUpdateEvent;
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
