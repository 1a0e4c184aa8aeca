// Twitch EventSub - typed webhook payloads, signed callback dispatch and a
// Helix subscription client.
//
// The webhook side is always available; the client, settings and logging
// crates sit behind features.

// Re-export core functionality
pub use eventsub_core as types;
pub use eventsub_webhooks as webhooks;

pub use eventsub_core::*;
pub use eventsub_webhooks::{
    DispatcherConfig, EventHandler, EventHandlers, Handler, HandlerError, HandlerFailurePolicy,
    HandlerKey, HandlerRegistry, MessageType, Unregister, WebhookDispatcher, WebhookError,
    WebhookRequest, WebhookResponse, WebhookSignature, handler_fn,
};

// Re-export optional crates
#[cfg(feature = "client")]
pub use eventsub_client as client;

#[cfg(feature = "config")]
pub use eventsub_config as config;

#[cfg(feature = "log")]
pub use eventsub_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Condition, DispatcherConfig, Event, EventType, HandlerError, HandlerFailurePolicy,
        HandlerKey, HandlerRegistry, Notification, Subscription, WebhookDispatcher, WebhookRequest,
        WebhookResponse, handler_fn,
    };

    #[cfg(feature = "client")]
    pub use eventsub_client::{ApiReply, ClientConfig, ListFilter, SubscriptionClient};

    #[cfg(feature = "config")]
    pub use eventsub_config::EventSubSettings;
}
