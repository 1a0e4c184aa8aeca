//! Twitch EventSub schema
//!
//! Typed descriptions of the subscription types this workspace understands:
//! the filter shape used when creating a subscription ([`Condition`]), the
//! payload delivered inside a notification ([`Event`]), and the remote
//! subscription record itself ([`Subscription`]).
//!
//! Every supported type is declared once in [`schema`], which generates the
//! [`EventType`], [`Condition`] and [`Event`] enums from the same table so
//! they can never drift apart.
//!
//! # Example
//!
//! ```rust
//! use eventsub_core::{BroadcasterCondition, Condition, EventType};
//!
//! let condition = Condition::StreamOnline(BroadcasterCondition::new("1337"));
//! assert_eq!(condition.event_type(), EventType::StreamOnline);
//! assert_eq!(condition.event_type().version(), "1");
//!
//! let json = serde_json::to_value(&condition).unwrap();
//! assert_eq!(json["broadcaster_user_id"], "1337");
//! ```

mod common;
mod condition;
mod error;
mod events;
mod notification;
pub mod schema;
mod subscription;

pub use common::{
    Badge, ChatCheer, ChatEmote, ChatFragment, ChatMessage, ChatReply, Cheermote, Emote, Mention,
    Reward, SubscriptionMessage,
};
pub use condition::{
    BroadcasterCondition, ChatCondition, ModeratedCondition, RaidCondition, RewardCondition,
    UserCondition,
};
pub use error::SchemaError;
pub use events::*;
pub use notification::{Notification, Revocation};
pub use schema::{Condition, Event, EventType};
pub use subscription::{Subscription, SubscriptionStatus, Transport, TransportMethod};

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
