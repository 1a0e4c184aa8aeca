//! Configuration for the webhook dispatcher

use std::time::Duration;

/// What the dispatcher does when a notification handler fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerFailurePolicy {
    /// Let every handler of the failing group finish, then return the first
    /// error to the caller. Later groups are skipped.
    #[default]
    Propagate,

    /// Log each failure and keep going; the caller always gets `204`
    LogAndContinue,
}

/// Configuration for [`WebhookDispatcher`](crate::WebhookDispatcher)
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    /// Reject messages whose timestamp is further than this from now.
    /// Disabled by default.
    pub timestamp_tolerance: Option<Duration>,

    /// Upper bound for each handler group. Disabled by default.
    pub handler_timeout: Option<Duration>,

    /// Handling of handler failures
    pub failure_policy: HandlerFailurePolicy,
}

impl DispatcherConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::new()
    }
}

/// Builder for DispatcherConfig
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfigBuilder {
    config: DispatcherConfig,
}

impl DispatcherConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp tolerance
    pub fn timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.config.timestamp_tolerance = Some(tolerance);
        self
    }

    /// Set the timestamp tolerance in seconds
    pub fn timestamp_tolerance_secs(mut self, secs: u64) -> Self {
        self.config.timestamp_tolerance = Some(Duration::from_secs(secs));
        self
    }

    /// Set the per-group handler timeout
    pub fn handler_timeout(mut self, timeout: Duration) -> Self {
        self.config.handler_timeout = Some(timeout);
        self
    }

    /// Set the failure policy
    pub fn failure_policy(mut self, policy: HandlerFailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DispatcherConfig {
        self.config
    }
}
