//! Condition shapes used when creating subscriptions

use serde::{Deserialize, Serialize};

/// Condition that only names the broadcaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcasterCondition {
    pub broadcaster_user_id: String,
}

impl BroadcasterCondition {
    pub fn new(broadcaster_user_id: impl Into<String>) -> Self {
        Self {
            broadcaster_user_id: broadcaster_user_id.into(),
        }
    }
}

/// Condition for subscriptions that require a moderator of the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeratedCondition {
    pub broadcaster_user_id: String,
    pub moderator_user_id: String,
}

impl ModeratedCondition {
    pub fn new(
        broadcaster_user_id: impl Into<String>,
        moderator_user_id: impl Into<String>,
    ) -> Self {
        Self {
            broadcaster_user_id: broadcaster_user_id.into(),
            moderator_user_id: moderator_user_id.into(),
        }
    }
}

/// Raid condition. Exactly one side should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_broadcaster_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_broadcaster_user_id: Option<String>,
}

impl RaidCondition {
    /// Raids started by the given broadcaster
    pub fn from_broadcaster(broadcaster_user_id: impl Into<String>) -> Self {
        Self {
            from_broadcaster_user_id: Some(broadcaster_user_id.into()),
            to_broadcaster_user_id: None,
        }
    }

    /// Raids targeting the given broadcaster
    pub fn to_broadcaster(broadcaster_user_id: impl Into<String>) -> Self {
        Self {
            from_broadcaster_user_id: None,
            to_broadcaster_user_id: Some(broadcaster_user_id.into()),
        }
    }
}

/// Channel points redemption condition, optionally narrowed to one reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCondition {
    pub broadcaster_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_id: Option<String>,
}

impl RewardCondition {
    pub fn new(broadcaster_user_id: impl Into<String>) -> Self {
        Self {
            broadcaster_user_id: broadcaster_user_id.into(),
            reward_id: None,
        }
    }

    pub fn with_reward(mut self, reward_id: impl Into<String>) -> Self {
        self.reward_id = Some(reward_id.into());
        self
    }
}

/// Chat condition: the channel and the user reading it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCondition {
    pub broadcaster_user_id: String,
    pub user_id: String,
}

impl ChatCondition {
    pub fn new(broadcaster_user_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            broadcaster_user_id: broadcaster_user_id.into(),
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCondition {
    pub user_id: String,
}

impl UserCondition {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let condition = RaidCondition::to_broadcaster("1234");
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value, json!({"to_broadcaster_user_id": "1234"}));

        let condition = RewardCondition::new("1234");
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value, json!({"broadcaster_user_id": "1234"}));
    }

    #[test]
    fn test_reward_condition_with_reward() {
        let condition = RewardCondition::new("1234").with_reward("abc");
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["reward_id"], "abc");
    }
}
