//! Verification and dispatch of incoming callbacks

use crate::{
    DispatcherConfig, Handler, HandlerError, HandlerFailurePolicy, HandlerKey, HandlerRegistry,
    WebhookError, WebhookRequest, WebhookResponse, WebhookSignature, headers,
};
use chrono::{DateTime, Utc};
use eventsub_core::{EventType, Notification, Revocation};
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Value of the message type header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Notification,
    WebhookCallbackVerification,
    Revocation,
}

impl MessageType {
    /// Parse a header value; unknown values yield `None`
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "notification" => Some(Self::Notification),
            "webhook_callback_verification" => Some(Self::WebhookCallbackVerification),
            "revocation" => Some(Self::Revocation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::WebhookCallbackVerification => "webhook_callback_verification",
            Self::Revocation => "revocation",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One handler per event type, passed to a single dispatch call.
///
/// The direct handler for a type runs before any registry handlers.
/// `on_unknown_event` runs instead when no direct handler matches.
#[derive(Clone, Default)]
pub struct EventHandlers {
    handlers: HashMap<EventType, Handler>,
    unknown: Option<Handler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler for an event type, replacing any previous one
    pub fn on(mut self, event_type: EventType, handler: Handler) -> Self {
        self.handlers.insert(event_type, handler);
        self
    }

    /// Set the fallback for notifications without a direct handler
    pub fn on_unknown_event(mut self, handler: Handler) -> Self {
        self.unknown = Some(handler);
        self
    }

    pub fn get(&self, event_type: EventType) -> Option<&Handler> {
        self.handlers.get(&event_type)
    }

    pub fn fallback(&self) -> Option<&Handler> {
        self.unknown.as_ref()
    }

    /// Handler to run for a notification: the direct one, else the fallback
    fn select(&self, event_type: Option<EventType>) -> Option<&Handler> {
        event_type
            .and_then(|event_type| self.get(event_type))
            .or_else(|| self.fallback())
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().map(EventType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("EventHandlers")
            .field("types", &types)
            .field("on_unknown_event", &self.unknown.is_some())
            .finish()
    }
}

/// A callback that passed header, JSON and signature checks
struct VerifiedMessage<'a> {
    id: &'a str,
    message_type: &'a str,
    body: Value,
}

/// Verifies callbacks and dispatches notifications to handlers
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    signature: WebhookSignature,
    registry: Arc<HandlerRegistry>,
    config: DispatcherConfig,
    handlers: Option<EventHandlers>,
}

impl WebhookDispatcher {
    /// Create a dispatcher for the given secret and registry
    pub fn new(secret: impl Into<String>, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            signature: WebhookSignature::new(secret),
            registry,
            config: DispatcherConfig::default(),
            handlers: None,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Direct handlers used when a call does not pass its own
    pub fn with_handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers = Some(handlers);
        self
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Validate one callback and run the handlers it selects.
    ///
    /// Rejections are returned as `Ok` responses with a 4xx status. `Err` is
    /// only produced by a failing handler under
    /// [`HandlerFailurePolicy::Propagate`].
    pub async fn process(
        &self,
        request: &WebhookRequest,
        handlers: Option<&EventHandlers>,
    ) -> Result<WebhookResponse, HandlerError> {
        let message = match self.verify(request) {
            Ok(message) => message,
            Err(rejection) => {
                tracing::warn!(
                    status = rejection.status(),
                    reason = %rejection,
                    "Rejected webhook callback"
                );
                return Ok(rejection.into_response());
            }
        };

        tracing::debug!(
            message_id = message.id,
            message_type = message.message_type,
            "Received webhook callback"
        );

        match MessageType::from_header(message.message_type) {
            Some(MessageType::Notification) => {
                let handlers = handlers.or(self.handlers.as_ref());
                self.notify(message.body, handlers).await
            }
            Some(MessageType::WebhookCallbackVerification) => Ok(Self::challenge(&message.body)),
            Some(MessageType::Revocation) => {
                Self::revoked(message.body);
                Ok(WebhookResponse::no_content())
            }
            None => Ok(WebhookError::InvalidMessageType(message.message_type.to_string())
                .into_response()),
        }
    }

    /// Like [`process`](Self::process), but a handler failure becomes a
    /// `500` response
    pub async fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        match self.process(request, None).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = %error, "Notification handling failed");
                WebhookResponse::error(500, "handler failed")
            }
        }
    }

    fn verify<'a>(&self, request: &'a WebhookRequest) -> Result<VerifiedMessage<'a>, WebhookError> {
        let (Some(id), Some(timestamp)) = (
            request.header(headers::MESSAGE_ID),
            request.header(headers::MESSAGE_TIMESTAMP),
        ) else {
            return Err(WebhookError::MissingIdOrTimestamp);
        };
        let signature = request
            .header(headers::MESSAGE_SIGNATURE)
            .ok_or(WebhookError::SignatureMissing)?;
        let message_type = request
            .header(headers::MESSAGE_TYPE)
            .ok_or(WebhookError::MessageTypeMissing)?;

        let raw = std::str::from_utf8(&request.body).map_err(|_| WebhookError::InvalidJson)?;
        let body: Value = serde_json::from_str(raw).map_err(|_| WebhookError::InvalidJson)?;

        if !self.signature.verify(id, timestamp, raw, signature) {
            return Err(WebhookError::SignatureInvalid);
        }

        if let Some(tolerance) = self.config.timestamp_tolerance {
            let sent = DateTime::parse_from_rfc3339(timestamp)
                .map_err(|_| WebhookError::TimestampInvalid)?;
            let skew = (Utc::now() - sent.with_timezone(&Utc))
                .num_seconds()
                .unsigned_abs();
            if skew > tolerance.as_secs() {
                return Err(WebhookError::TimestampInvalid);
            }
        }

        Ok(VerifiedMessage {
            id,
            message_type,
            body,
        })
    }

    async fn notify(
        &self,
        body: Value,
        handlers: Option<&EventHandlers>,
    ) -> Result<WebhookResponse, HandlerError> {
        let notification = match Notification::from_value(body) {
            Ok(notification) => Arc::new(notification),
            Err(error) => {
                tracing::warn!(error = %error, "Notification body has no usable subscription");
                return Ok(WebhookError::InvalidJson.into_response());
            }
        };
        let event_type = notification.event_type();

        tracing::info!(
            subscription_id = %notification.subscription.id,
            event_type = notification.event_type_name(),
            "Dispatching notification"
        );

        if let Some(handler) = handlers.and_then(|handlers| handlers.select(event_type)) {
            self.run_group("direct", vec![Arc::clone(handler)], &notification)
                .await?;
        }

        if let Some(event_type) = event_type {
            let typed = self.registry.lookup(&HandlerKey::Event(event_type));
            self.run_group("typed", typed, &notification).await?;
        }

        let wildcard = self.registry.lookup(&HandlerKey::Wildcard);
        self.run_group("wildcard", wildcard, &notification).await?;

        Ok(WebhookResponse::no_content())
    }

    /// Run a group of handlers concurrently and wait for all of them
    async fn run_group(
        &self,
        group: &'static str,
        handlers: Vec<Handler>,
        notification: &Arc<Notification>,
    ) -> Result<(), HandlerError> {
        if handlers.is_empty() {
            return Ok(());
        }

        let calls = handlers
            .iter()
            .map(|handler| handler.handle(Arc::clone(notification)));

        let results = match self.config.handler_timeout {
            Some(limit) => match tokio::time::timeout(limit, join_all(calls)).await {
                Ok(results) => results,
                Err(_) => vec![Err(HandlerError::Timeout(limit))],
            },
            None => join_all(calls).await,
        };

        self.settle(group, results)
    }

    fn settle(
        &self,
        group: &'static str,
        results: Vec<Result<(), HandlerError>>,
    ) -> Result<(), HandlerError> {
        let mut first = None;
        for error in results.into_iter().filter_map(Result::err) {
            tracing::error!(group, error = %error, "Notification handler failed");
            first.get_or_insert(error);
        }

        match (first, self.config.failure_policy) {
            (Some(error), HandlerFailurePolicy::Propagate) => Err(error),
            _ => Ok(()),
        }
    }

    fn challenge(body: &Value) -> WebhookResponse {
        match body.get("challenge").and_then(Value::as_str) {
            Some(challenge) => {
                tracing::info!("Answering callback verification challenge");
                WebhookResponse::text(challenge)
            }
            None => WebhookError::MissingChallenge.into_response(),
        }
    }

    fn revoked(body: Value) {
        match serde_json::from_value::<Revocation>(body) {
            Ok(revocation) => tracing::warn!(
                subscription_id = %revocation.subscription.id,
                subscription_type = %revocation.subscription.subscription_type,
                status = revocation.subscription.status.as_str(),
                "Subscription revoked"
            ),
            Err(_) => tracing::warn!("Subscription revoked with an unreadable body"),
        }
    }
}
