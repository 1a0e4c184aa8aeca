//! Decoding of representative notification payloads for each event family.

use eventsub_core::*;
use serde_json::{Value, json};

fn notification(event_type: &str, version: &str, condition: Value, event: Value) -> Notification {
    Notification::from_value(json!({
        "subscription": {
            "id": "f1c2a387-161a-49f9-a165-0f21d7a4e1c4",
            "type": event_type,
            "version": version,
            "status": "enabled",
            "cost": 0,
            "condition": condition,
            "transport": {"method": "webhook", "callback": "https://example.com/webhooks/callback"},
            "created_at": "2019-11-16T10:11:12.634234626Z"
        },
        "event": event
    }))
    .unwrap()
}

#[test]
fn test_chat_message_with_fragments_and_badges() {
    let n = notification(
        "channel.chat.message",
        "1",
        json!({"broadcaster_user_id": "1971641", "user_id": "2914196"}),
        json!({
            "broadcaster_user_id": "1971641",
            "broadcaster_user_login": "streamer",
            "broadcaster_user_name": "streamer",
            "chatter_user_id": "4145994",
            "chatter_user_login": "viewer32",
            "chatter_user_name": "viewer32",
            "message_id": "cc106a89-1814-919d-454c-f4f2f970aae7",
            "message": {
                "text": "Hi chat Kappa @streamer cheer100",
                "fragments": [
                    {"type": "text", "text": "Hi chat ", "cheermote": null, "emote": null, "mention": null},
                    {"type": "emote", "text": "Kappa", "cheermote": null,
                     "emote": {"id": "25", "emote_set_id": "0", "owner_id": "0", "format": ["static"]},
                     "mention": null},
                    {"type": "mention", "text": "@streamer", "cheermote": null, "emote": null,
                     "mention": {"user_id": "1971641", "user_name": "streamer", "user_login": "streamer"}},
                    {"type": "cheermote", "text": "cheer100",
                     "cheermote": {"prefix": "cheer", "bits": 100, "tier": 1},
                     "emote": null, "mention": null}
                ]
            },
            "color": "#00FF7F",
            "badges": [{"set_id": "moderator", "id": "1", "info": ""}],
            "message_type": "text",
            "cheer": {"bits": 100},
            "reply": null,
            "channel_points_custom_reward_id": null
        }),
    );

    let Event::ChannelChatMessage(chat) = &n.event else {
        panic!("unexpected event: {:?}", n.event);
    };
    assert_eq!(chat.message.fragments.len(), 4);
    assert_eq!(chat.message.fragments[1].emote.as_ref().unwrap().id, "25");
    assert_eq!(
        chat.message.fragments[2].mention.as_ref().unwrap().user_login,
        "streamer"
    );
    assert_eq!(chat.message.fragments[3].cheermote.as_ref().unwrap().bits, 100);
    assert_eq!(chat.badges[0].set_id, "moderator");
    assert_eq!(chat.cheer, Some(ChatCheer { bits: 100 }));
    assert!(chat.reply.is_none());
}

#[test]
fn test_anonymous_gift() {
    let n = notification(
        "channel.subscription.gift",
        "1",
        json!({"broadcaster_user_id": "1337"}),
        json!({
            "user_id": null,
            "user_login": null,
            "user_name": null,
            "broadcaster_user_id": "1337",
            "broadcaster_user_login": "cooler_user",
            "broadcaster_user_name": "Cooler_User",
            "total": 2,
            "tier": "1000",
            "cumulative_total": null,
            "is_anonymous": true
        }),
    );

    let Event::ChannelSubscriptionGift(gift) = &n.event else {
        panic!("unexpected event: {:?}", n.event);
    };
    assert!(gift.is_anonymous);
    assert_eq!(gift.user_id, None);
    assert_eq!(gift.total, 2);
}

#[test]
fn test_redemption_with_reward() {
    let n = notification(
        "channel.channel_points_custom_reward_redemption.add",
        "1",
        json!({"broadcaster_user_id": "1337"}),
        json!({
            "id": "17fa2df1-ad76-4804-bfa5-a40ef63efe63",
            "broadcaster_user_id": "1337",
            "broadcaster_user_login": "cool_user",
            "broadcaster_user_name": "Cool_User",
            "user_id": "9001",
            "user_login": "cooler_user",
            "user_name": "Cooler_User",
            "user_input": "pogchamp",
            "status": "unfulfilled",
            "reward": {"id": "92af127c-7326-4483-a52b-b0da0be61c01", "title": "title", "cost": 100, "prompt": "reward prompt"},
            "redeemed_at": "2020-07-15T17:16:03.17106713Z"
        }),
    );

    let Event::ChannelPointsRedemptionAdd(redemption) = &n.event else {
        panic!("unexpected event: {:?}", n.event);
    };
    assert_eq!(redemption.reward.cost, 100);
    assert_eq!(redemption.user_input, "pogchamp");
    assert_eq!(
        n.subscription.typed_condition().unwrap(),
        Condition::ChannelPointsRedemptionAdd(RewardCondition::new("1337"))
    );
}

#[test]
fn test_permanent_ban_has_no_end() {
    let n = notification(
        "channel.ban",
        "1",
        json!({"broadcaster_user_id": "1337"}),
        json!({
            "user_id": "1234",
            "user_login": "cool_user",
            "user_name": "Cool_User",
            "broadcaster_user_id": "1337",
            "broadcaster_user_login": "cooler_user",
            "broadcaster_user_name": "Cooler_User",
            "moderator_user_id": "1339",
            "moderator_user_login": "mod_user",
            "moderator_user_name": "Mod_User",
            "reason": "Offensive language",
            "banned_at": "2020-07-15T18:15:11.17106713Z",
            "ends_at": null,
            "is_permanent": true
        }),
    );

    let Event::ChannelBan(ban) = &n.event else {
        panic!("unexpected event: {:?}", n.event);
    };
    assert!(ban.is_permanent);
    assert!(ban.ends_at.is_none());
}

#[test]
fn test_stream_online_and_event_serialization() {
    let payload = json!({
        "id": "9001",
        "broadcaster_user_id": "1337",
        "broadcaster_user_login": "cool_user",
        "broadcaster_user_name": "Cool_User",
        "type": "live",
        "started_at": "2020-10-11T10:11:12.123Z"
    });
    let n = notification(
        "stream.online",
        "1",
        json!({"broadcaster_user_id": "1337"}),
        payload,
    );

    let Event::StreamOnline(online) = &n.event else {
        panic!("unexpected event: {:?}", n.event);
    };
    assert_eq!(online.stream_type, "live");

    let serialized = serde_json::to_value(&n.event).unwrap();
    assert_eq!(serialized["type"], "live");
    assert_eq!(serialized["broadcaster_user_id"], "1337");
}
