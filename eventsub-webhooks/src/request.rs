//! Transport-neutral request and response values

use serde_json::json;
use std::borrow::Cow;
use std::collections::HashMap;

/// Header names sent by EventSub on every callback
pub mod headers {
    /// Unique id of the message; retries reuse it
    pub const MESSAGE_ID: &str = "Twitch-Eventsub-Message-Id";

    /// RFC 3339 time the message was sent
    pub const MESSAGE_TIMESTAMP: &str = "Twitch-Eventsub-Message-Timestamp";

    /// `sha256=<hex>` HMAC of id, timestamp and body
    pub const MESSAGE_SIGNATURE: &str = "Twitch-Eventsub-Message-Signature";

    /// `notification`, `webhook_callback_verification` or `revocation`
    pub const MESSAGE_TYPE: &str = "Twitch-Eventsub-Message-Type";
}

/// An incoming callback request: headers and the raw body
#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl WebhookRequest {
    /// Create a request with the given body and no headers
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl From<http::Request<Vec<u8>>> for WebhookRequest {
    fn from(request: http::Request<Vec<u8>>) -> Self {
        let (parts, body) = request.into_parts();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        Self { headers, body }
    }
}

/// Response to send back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl WebhookResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// `204 No Content`
    pub fn no_content() -> Self {
        Self::new(204)
    }

    /// `200` with a plain-text body, sent verbatim
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(200)
            .with_header("content-type", "text/plain")
            .with_body(body.into().into_bytes())
    }

    /// JSON error body of the form `{"error": "<message>"}`
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = json!({ "error": message.into() }).to_string();
        Self::new(status)
            .with_header("content-type", "application/json")
            .with_body(body.into_bytes())
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body as text, replacing invalid UTF-8
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The `error` message of a JSON error response
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value.get("error")?.as_str().map(str::to_string)
    }

    /// Convert into an `http::Response` for a server framework
    pub fn into_http(self) -> Result<http::Response<Vec<u8>>, http::Error> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(self.body)
    }
}
