//! Subscription client tests against a mock Helix server

use eventsub_client::{ApiReply, ClientConfig, ListFilter, SubscriptionClient};
use eventsub_core::{
    BroadcasterCondition, Condition, EventType, ModeratedCondition, SubscriptionStatus,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLBACK: &str = "https://example.com/webhooks/callback";
const SECRET: &str = "s3cRe7-s3cRe7";

fn client(server: &MockServer) -> SubscriptionClient {
    let config = ClientConfig::builder()
        .client_id("my-client-id")
        .client_secret("my-client-secret")
        .access_token("my-token")
        .callback_url(CALLBACK)
        .webhook_secret(SECRET)
        .api_base_url(format!("{}/helix", server.uri()))
        .auth_base_url(server.uri())
        .build();
    SubscriptionClient::new(config).unwrap()
}

fn subscription(id: &str, event_type: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": "enabled",
        "type": event_type,
        "version": "1",
        "condition": {"broadcaster_user_id": "1337"},
        "created_at": "2020-11-10T14:32:18.730260295Z",
        "transport": {"method": "webhook", "callback": CALLBACK},
        "cost": 1
    })
}

#[tokio::test]
async fn test_create_subscription_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(header("Authorization", "Bearer my-token"))
        .and(header("Client-Id", "my-client-id"))
        .and(body_json(json!({
            "type": "channel.follow",
            "version": "2",
            "condition": {"broadcaster_user_id": "1337", "moderator_user_id": "1337"},
            "transport": {"method": "webhook", "callback": CALLBACK, "secret": SECRET}
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "data": [subscription("sub-1", "channel.follow")],
            "total": 1,
            "total_cost": 1,
            "max_total_cost": 10000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .create_subscription(Condition::ChannelFollow(ModeratedCondition::new(
            "1337", "1337",
        )))
        .await;

    let created = reply.unwrap().success().unwrap();
    assert_eq!(created.data[0].id, "sub-1");
    assert_eq!(created.max_total_cost, 10000);
}

#[tokio::test]
async fn test_create_subscription_failure_returns_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/helix/eventsub/subscriptions"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "Conflict",
            "status": 409,
            "message": "subscription already exists"
        })))
        .mount(&server)
        .await;

    let reply = client(&server)
        .create_subscription(Condition::StreamOnline(BroadcasterCondition::new("1337")))
        .await;

    match reply {
        Some(ApiReply::Failure(body)) => {
            assert_eq!(body.status, 409);
            assert_eq!(body.message, "subscription already exists");
        }
        other => panic!("expected failure body, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_failure_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let reply = client(&server)
        .list_subscriptions(&ListFilter::All, None)
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_none() {
    let config = ClientConfig::builder()
        .client_id("my-client-id")
        .access_token("my-token")
        .api_base_url("http://127.0.0.1:9/helix")
        .build();
    let client = SubscriptionClient::new(config).unwrap();

    assert!(client.list_subscriptions(&ListFilter::All, None).await.is_none());
    client.delete_subscription("sub-1").await;
}

#[tokio::test]
async fn test_delete_subscription() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param("id", "sub-1"))
        .and(header("Authorization", "Bearer my-token"))
        .and(header("Client-Id", "my-client-id"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_subscription("sub-1").await;
}

#[tokio::test]
async fn test_delete_failure_is_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Not Found",
            "status": 404,
            "message": "subscription not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_subscription("missing").await;
}

#[tokio::test]
async fn test_list_filters() {
    let server = MockServer::start().await;
    let body = json!({
        "data": [subscription("sub-1", "stream.online")],
        "total": 1,
        "total_cost": 1,
        "max_total_cost": 10000,
        "pagination": {}
    });

    Mock::given(method("GET"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param("status", "enabled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param("type", "stream.online"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let by_status = client
        .list_subscriptions(&ListFilter::Status(SubscriptionStatus::Enabled), None)
        .await;
    let by_type = client
        .list_subscriptions(&ListFilter::Type(EventType::StreamOnline), None)
        .await;
    let all = client.list_subscriptions(&ListFilter::All, None).await;

    for reply in [by_status, by_type, all] {
        let list = reply.unwrap().success().unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.data[0].event_type(), Some(EventType::StreamOnline));
    }
}

#[tokio::test]
async fn test_list_all_follows_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param("after", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [subscription("sub-3", "stream.offline")],
            "total": 3,
            "total_cost": 3,
            "max_total_cost": 10000,
            "pagination": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                subscription("sub-1", "stream.online"),
                subscription("sub-2", "stream.online")
            ],
            "total": 3,
            "total_cost": 3,
            "max_total_cost": 10000,
            "pagination": {"cursor": "page-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client(&server)
        .list_all_subscriptions(&ListFilter::All)
        .await
        .unwrap()
        .success()
        .unwrap();

    let ids: Vec<_> = list.data.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["sub-1", "sub-2", "sub-3"]);
    assert_eq!(list.total, 3);
}

#[tokio::test]
async fn test_authenticate_stores_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("client_id", "my-client-id"))
        .and(query_param("client_secret", "my-client-secret"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "expires_in": 5011271,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/helix/eventsub/subscriptions"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = client.authenticate().await.unwrap().success().unwrap();

    assert_eq!(token.expires_in, 5011271);
    assert_eq!(client.access_token().as_deref(), Some("fresh-token"));
    client.delete_subscription("sub-1").await;
}

#[tokio::test]
async fn test_authenticate_failure_keeps_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "invalid client secret"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let reply = client.authenticate().await.unwrap();

    assert_eq!(reply.failure().map(|body| body.status), Some(400));
    assert_eq!(client.access_token().as_deref(), Some("my-token"));
}

#[tokio::test]
async fn test_authenticate_without_secret() {
    let server = MockServer::start().await;
    let config = ClientConfig::builder()
        .client_id("my-client-id")
        .auth_base_url(server.uri())
        .build();
    let client = SubscriptionClient::new(config).unwrap();

    assert!(client.authenticate().await.is_none());
    assert!(client.access_token().is_none());
}
