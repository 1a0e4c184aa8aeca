//! # EventSub Subscription Client
//!
//! Manages EventSub webhook subscriptions through the Twitch Helix API.
//!
//! ## Features
//!
//! - **Create**: subscribe to any supported event type with a typed condition
//! - **List**: filter by status, type or user, and follow pagination cursors
//! - **Delete**: remove a subscription by id
//! - **App Tokens**: client-credentials exchange for an app access token
//!
//! Remote failures are logged and never raised. Calls that expect a body
//! return `Option<ApiReply<T>>`: `None` when nothing parseable came back,
//! otherwise the success payload or the error body sent by the API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventsub_client::{ApiReply, ClientConfig, SubscriptionClient};
//! use eventsub_core::{BroadcasterCondition, Condition};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .client_id("your-client-id")
//!         .client_secret("your-client-secret")
//!         .callback_url("https://example.com/webhooks/callback")
//!         .webhook_secret("your-webhook-secret")
//!         .build();
//!
//!     let client = SubscriptionClient::new(config)?;
//!     client.authenticate().await;
//!
//!     let condition = Condition::StreamOnline(BroadcasterCondition::new("1337"));
//!     if let Some(ApiReply::Success(created)) = client.create_subscription(condition).await {
//!         println!("created {}", created.data[0].id);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::SubscriptionClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL};
pub use error::{ClientError, Result};
pub use request::{CreateSubscriptionRequest, ListFilter};
pub use response::{ApiErrorBody, ApiReply, AppAccessToken, Pagination, SubscriptionList};
