//! EventSub webhook receiving for Twitch
//!
//! This crate verifies incoming EventSub webhook callbacks and dispatches the
//! typed events they carry to registered handlers.
//!
//! # Features
//!
//! - **Signature Verification**: HMAC-SHA256 over message id, timestamp and raw body
//! - **Message Types**: notifications, callback verification challenges, revocations
//! - **Handler Registry**: per-event-type and wildcard handlers with unregister handles
//! - **Fan-out Dispatch**: handlers of one group run concurrently and are all awaited
//!
//! # Example: Handling Callbacks
//!
//! ```rust,no_run
//! use eventsub_webhooks::{
//!     handler_fn, EventType, HandlerKey, HandlerRegistry, WebhookDispatcher, WebhookRequest,
//! };
//! use std::sync::Arc;
//!
//! # async fn run(request: WebhookRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(HandlerRegistry::new());
//!
//! let follows = registry.register(
//!     EventType::ChannelFollow,
//!     handler_fn(|notification| async move {
//!         println!("new follower: {:?}", notification.event);
//!         Ok(())
//!     }),
//! );
//!
//! let dispatcher = WebhookDispatcher::new("your-webhook-secret", Arc::clone(&registry));
//! let response = dispatcher.process(&request, None).await?;
//! assert!(response.status == 204 || response.status >= 400);
//!
//! // Stop receiving follows
//! follows.unregister();
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Signing a Test Message
//!
//! ```rust
//! use eventsub_webhooks::WebhookSignature;
//!
//! let signer = WebhookSignature::new("your-webhook-secret");
//! let signature = signer.sign("message-id", "2023-01-01T00:00:00Z", r#"{"challenge":"abc"}"#);
//! assert!(signature.starts_with("sha256="));
//! ```

mod config;
mod dispatcher;
mod error;
mod registry;
mod request;
mod signature;

pub use config::{DispatcherConfig, DispatcherConfigBuilder, HandlerFailurePolicy};
pub use dispatcher::{EventHandlers, MessageType, WebhookDispatcher};
pub use error::{HandlerError, WebhookError};
pub use registry::{EventHandler, Handler, HandlerKey, HandlerRegistry, Unregister, handler_fn};
pub use request::{WebhookRequest, WebhookResponse, headers};
pub use signature::{SIGNATURE_PREFIX, WebhookSignature, constant_time_eq, hmac_hex};

pub use eventsub_core::{Event, EventType, Notification, Subscription};

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
