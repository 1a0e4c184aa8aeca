//! Integration tests for common EventSub workflows.
//!
//! A subscription is created through the client against a mock Helix API,
//! then the callbacks Twitch would send for it are fed through the
//! dispatcher with the same secret.

use eventsub::client::{ApiReply, ClientConfig, SubscriptionClient};
use eventsub::prelude::*;
use eventsub::webhooks::{WebhookSignature, headers};
use eventsub::{ModeratedCondition, SubscriptionStatus};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "workflow-secret-0123";
const CALLBACK: &str = "https://example.com/webhooks/callback";
const TIMESTAMP: &str = "2023-07-19T14:56:51.634234626Z";

fn callback(message_id: &str, message_type: &str, body: &str) -> WebhookRequest {
    let signature = WebhookSignature::new(SECRET).sign(message_id, TIMESTAMP, body);
    WebhookRequest::new(body)
        .with_header(headers::MESSAGE_ID, message_id)
        .with_header(headers::MESSAGE_TIMESTAMP, TIMESTAMP)
        .with_header(headers::MESSAGE_SIGNATURE, signature)
        .with_header(headers::MESSAGE_TYPE, message_type)
}

fn subscription(status: &str) -> serde_json::Value {
    json!({
        "id": "f1c2a387-161a-49f9-a165-0f21d7a4e1c4",
        "status": status,
        "type": "channel.follow",
        "version": "2",
        "condition": { "broadcaster_user_id": "1337", "moderator_user_id": "1337" },
        "transport": { "method": "webhook", "callback": CALLBACK },
        "created_at": "2023-07-19T14:56:51.616329898Z",
        "cost": 0
    })
}

// =============================================================================
// Subscribe, verify, receive, revoke
// =============================================================================

#[tokio::test]
async fn test_subscription_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(body_partial_json(json!({
            "type": "channel.follow",
            "version": "2",
            "transport": { "method": "webhook", "callback": CALLBACK, "secret": SECRET }
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "data": [subscription("webhook_callback_verification_pending")],
            "total": 1,
            "total_cost": 0,
            "max_total_cost": 10000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SubscriptionClient::new(
        ClientConfig::builder()
            .client_id("workflow-client")
            .access_token("workflow-token")
            .callback_url(CALLBACK)
            .webhook_secret(SECRET)
            .api_base_url(format!("{}/helix", server.uri()))
            .build(),
    )
    .unwrap();

    let created = client
        .create_subscription(Condition::ChannelFollow(ModeratedCondition::new(
            "1337", "1337",
        )))
        .await;
    let Some(ApiReply::Success(created)) = created else {
        panic!("expected a created subscription, got {:?}", created);
    };
    assert_eq!(
        created.data[0].status,
        SubscriptionStatus::WebhookCallbackVerificationPending
    );

    // The receiving side
    let registry = Arc::new(HandlerRegistry::new());
    let followers = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&followers);
    let follows = registry.register(
        EventType::ChannelFollow,
        handler_fn(move |notification| {
            let seen = Arc::clone(&seen);
            async move {
                if let Event::ChannelFollow(follow) = &notification.event {
                    seen.lock().push(follow.user_login.clone());
                }
                Ok(())
            }
        }),
    );
    let dispatcher = WebhookDispatcher::new(SECRET, Arc::clone(&registry));

    // Callback verification
    let challenge = json!({
        "challenge": "pogchamp-kappa-360noscope-vohiyo",
        "subscription": subscription("webhook_callback_verification_pending")
    })
    .to_string();
    let response = dispatcher
        .handle(&callback("msg-1", "webhook_callback_verification", &challenge))
        .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body_text(), "pogchamp-kappa-360noscope-vohiyo");

    // Notification
    let notification = json!({
        "subscription": subscription("enabled"),
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
    .to_string();
    let response = dispatcher
        .handle(&callback("msg-2", "notification", &notification))
        .await;
    assert_eq!(response.status, 204);
    assert_eq!(*followers.lock(), vec!["cool_user".to_string()]);

    // A forged copy is rejected and reaches no handler
    let mut forged = callback("msg-3", "notification", &notification);
    forged = forged.with_header(headers::MESSAGE_SIGNATURE, "sha256=00");
    let response = dispatcher.handle(&forged).await;
    assert_eq!(response.status, 401);
    assert_eq!(followers.lock().len(), 1);

    // Revocation
    let revocation = json!({ "subscription": subscription("authorization_revoked") }).to_string();
    let response = dispatcher
        .handle(&callback("msg-4", "revocation", &revocation))
        .await;
    assert_eq!(response.status, 204);

    follows.unregister();
    assert!(registry.is_empty());
}

// =============================================================================
// Configured dispatcher
// =============================================================================

#[tokio::test]
async fn test_failing_handler_under_both_policies() {
    let body = json!({
        "subscription": subscription("enabled"),
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
    .to_string();

    let registry = Arc::new(HandlerRegistry::new());
    let _failing = registry.register(
        HandlerKey::Wildcard,
        handler_fn(|_| async { Err(HandlerError::failed("database unavailable")) }),
    );

    let strict = WebhookDispatcher::new(SECRET, Arc::clone(&registry));
    let response = strict.handle(&callback("msg-5", "notification", &body)).await;
    assert_eq!(response.status, 500);

    let lenient = WebhookDispatcher::new(SECRET, Arc::clone(&registry)).with_config(
        DispatcherConfig::builder()
            .failure_policy(HandlerFailurePolicy::LogAndContinue)
            .build(),
    );
    let response = lenient.handle(&callback("msg-6", "notification", &body)).await;
    assert_eq!(response.status, 204);
}
