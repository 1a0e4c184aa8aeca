//! Registry of notification handlers

use crate::HandlerError;
use async_trait::async_trait;
use eventsub_core::{EventType, Notification, SchemaError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Something that reacts to a notification
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, notification: Arc<Notification>) -> Result<(), HandlerError>;
}

#[async_trait]
impl<F, Fut> EventHandler for F
where
    F: Fn(Arc<Notification>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, notification: Arc<Notification>) -> Result<(), HandlerError> {
        (self)(notification).await
    }
}

/// Shared handler reference. Identity (not equality) decides removal.
pub type Handler = Arc<dyn EventHandler>;

/// Wrap an async closure as a [`Handler`]
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(Arc<Notification>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Arc::new(f)
}

fn same_handler(a: &Handler, b: &Handler) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// What a handler is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKey {
    /// Notifications of one subscription type
    Event(EventType),
    /// Every notification
    Wildcard,
}

impl HandlerKey {
    /// Textual form of the wildcard key
    pub const WILDCARD: &'static str = "*";
}

impl From<EventType> for HandlerKey {
    fn from(event_type: EventType) -> Self {
        Self::Event(event_type)
    }
}

impl FromStr for HandlerKey {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::WILDCARD {
            Ok(Self::Wildcard)
        } else {
            s.parse().map(Self::Event)
        }
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(event_type) => f.write_str(event_type.as_str()),
            Self::Wildcard => f.write_str(Self::WILDCARD),
        }
    }
}

/// Mapping from event type (or wildcard) to the handlers registered for it
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<HandlerKey, Vec<Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    ///
    /// Registering the same handler twice under one key keeps a single
    /// entry. The returned [`Unregister`] removes exactly this handler.
    pub fn register(self: &Arc<Self>, key: impl Into<HandlerKey>, handler: Handler) -> Unregister {
        let key = key.into();
        {
            let mut handlers = self.handlers.write();
            let set = handlers.entry(key).or_default();
            if !set.iter().any(|existing| same_handler(existing, &handler)) {
                set.push(Arc::clone(&handler));
            }
        }
        tracing::debug!(key = %key, "Registered notification handler");

        Unregister {
            registry: Arc::downgrade(self),
            key,
            handler,
            done: AtomicBool::new(false),
        }
    }

    /// Remove a handler by identity. Returns whether it was registered.
    pub fn remove(&self, key: &HandlerKey, handler: &Handler) -> bool {
        let mut handlers = self.handlers.write();
        let Some(set) = handlers.get_mut(key) else {
            return false;
        };

        let before = set.len();
        set.retain(|existing| !same_handler(existing, handler));
        let removed = set.len() < before;

        if set.is_empty() {
            handlers.remove(key);
        }
        removed
    }

    /// Handlers registered under a key. The registry is not modified.
    pub fn lookup(&self, key: &HandlerKey) -> Vec<Handler> {
        self.handlers.read().get(key).cloned().unwrap_or_default()
    }

    /// Check if any handler is registered under a key
    pub fn contains_key(&self, key: &HandlerKey) -> bool {
        self.handlers.read().contains_key(key)
    }

    /// Keys that currently have handlers
    pub fn keys(&self) -> Vec<HandlerKey> {
        self.handlers.read().keys().copied().collect()
    }

    /// Number of keys with at least one handler
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Total number of registrations across all keys
    pub fn handler_count(&self) -> usize {
        self.handlers.read().values().map(Vec::len).sum()
    }

    /// Remove every handler
    pub fn clear(&self) {
        self.handlers.write().clear();
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        let mut map = f.debug_map();
        for (key, set) in handlers.iter() {
            map.entry(&key.to_string(), &set.len());
        }
        map.finish()
    }
}

/// Handle returned by [`HandlerRegistry::register`].
///
/// Dropping it leaves the handler registered.
pub struct Unregister {
    registry: Weak<HandlerRegistry>,
    key: HandlerKey,
    handler: Handler,
    done: AtomicBool,
}

impl Unregister {
    /// Remove the handler. Calling this more than once is a no-op.
    pub fn unregister(&self) {
        if self.done.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(registry) = self.registry.upgrade()
            && registry.remove(&self.key, &self.handler)
        {
            tracing::debug!(key = %self.key, "Unregistered notification handler");
        }
    }

    /// Key the handler was registered under
    pub fn key(&self) -> HandlerKey {
        self.key
    }
}

impl fmt::Debug for Unregister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unregister")
            .field("key", &self.key)
            .field("done", &self.done.load(Ordering::Relaxed))
            .finish()
    }
}
