//! Event payloads delivered inside notifications
//!
//! Field names follow the EventSub wire format so the structs deserialize
//! directly from the `event` object of a notification.

use crate::common::{Badge, ChatCheer, ChatMessage, ChatReply, Reward, SubscriptionMessage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `channel.update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUpdateEvent {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub title: String,
    pub language: String,
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub content_classification_labels: Vec<String>,
}

/// `channel.follow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFollowEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub followed_at: DateTime<Utc>,
}

/// `channel.subscribe` and `channel.subscription.end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSubscribeEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub tier: String,
    pub is_gift: bool,
}

/// `channel.subscription.gift`
///
/// The gifter fields are null when the gift is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSubscriptionGiftEvent {
    pub user_id: Option<String>,
    pub user_login: Option<String>,
    pub user_name: Option<String>,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub total: u64,
    pub tier: String,
    #[serde(default)]
    pub cumulative_total: Option<u64>,
    pub is_anonymous: bool,
}

/// `channel.subscription.message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSubscriptionMessageEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub tier: String,
    pub message: SubscriptionMessage,
    pub cumulative_months: u64,
    #[serde(default)]
    pub streak_months: Option<u64>,
    pub duration_months: u64,
}

/// `channel.cheer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCheerEvent {
    pub is_anonymous: bool,
    pub user_id: Option<String>,
    pub user_login: Option<String>,
    pub user_name: Option<String>,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub message: String,
    pub bits: u64,
}

/// `channel.raid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRaidEvent {
    pub from_broadcaster_user_id: String,
    pub from_broadcaster_user_login: String,
    pub from_broadcaster_user_name: String,
    pub to_broadcaster_user_id: String,
    pub to_broadcaster_user_login: String,
    pub to_broadcaster_user_name: String,
    pub viewers: u64,
}

/// `channel.ban`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBanEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
    #[serde(default)]
    pub reason: String,
    pub banned_at: DateTime<Utc>,
    /// None for permanent bans
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    pub is_permanent: bool,
}

/// `channel.unban`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUnbanEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
}

/// `channel.moderator.add` and `channel.moderator.remove`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelModeratorEvent {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

/// `channel.channel_points_custom_reward_redemption.add`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPointsRedemptionEvent {
    pub id: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub user_input: String,
    /// `unfulfilled`, `fulfilled`, `canceled` or `unknown`
    pub status: String,
    pub reward: Reward,
    pub redeemed_at: DateTime<Utc>,
}

/// `channel.ad_break.begin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAdBreakBeginEvent {
    pub duration_seconds: u32,
    pub started_at: DateTime<Utc>,
    pub is_automatic: bool,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub requester_user_id: String,
    pub requester_user_login: String,
    pub requester_user_name: String,
}

/// `channel.chat.message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelChatMessageEvent {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub chatter_user_id: String,
    pub chatter_user_login: String,
    pub chatter_user_name: String,
    pub message_id: String,
    pub message: ChatMessage,
    pub message_type: String,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub cheer: Option<ChatCheer>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub reply: Option<ChatReply>,
    #[serde(default)]
    pub channel_points_custom_reward_id: Option<String>,
}

/// `stream.online`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOnlineEvent {
    pub id: String,
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    /// `live`, `playlist`, `watch_party`, `premiere` or `rerun`
    #[serde(rename = "type")]
    pub stream_type: String,
    pub started_at: DateTime<Utc>,
}

/// `stream.offline`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOfflineEvent {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
}

/// `user.update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdateEvent {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    /// Only present with the `user:read:email` scope
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub description: String,
}
