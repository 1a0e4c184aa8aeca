//! Fuzz target for webhook callback dispatch.
//!
//! Feeds arbitrary headers and bodies through the dispatcher, both unsigned
//! and correctly signed, and checks the response is always one of the
//! statuses the dispatcher is allowed to produce.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use eventsub_webhooks::{
    HandlerKey, HandlerRegistry, WebhookDispatcher, WebhookRequest, WebhookSignature, handler_fn,
    headers,
};
use std::sync::Arc;

const SECRET: &str = "fuzzing-secret-0123";

/// Arbitrary callback request for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzCallback {
    message_id: Option<String>,
    timestamp: Option<String>,
    message_type: Option<String>,
    signature: Option<String>,
    body: Vec<u8>,
    /// Replace the signature with a valid one
    sign: bool,
}

fuzz_target!(|data: FuzzCallback| {
    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(_) => return,
    };

    let registry = Arc::new(HandlerRegistry::new());
    let _all = registry.register(HandlerKey::Wildcard, handler_fn(|_| async { Ok(()) }));
    let dispatcher = WebhookDispatcher::new(SECRET, registry);

    let mut request = WebhookRequest::new(data.body.clone());
    if let Some(id) = &data.message_id {
        request = request.with_header(headers::MESSAGE_ID, id.as_str());
    }
    if let Some(timestamp) = &data.timestamp {
        request = request.with_header(headers::MESSAGE_TIMESTAMP, timestamp.as_str());
    }
    if let Some(message_type) = &data.message_type {
        request = request.with_header(headers::MESSAGE_TYPE, message_type.as_str());
    }

    let signature = match (&data.message_id, &data.timestamp, std::str::from_utf8(&data.body)) {
        (Some(id), Some(timestamp), Ok(body)) if data.sign => {
            Some(WebhookSignature::new(SECRET).sign(id, timestamp, body))
        }
        _ => data.signature.clone(),
    };
    if let Some(signature) = signature {
        request = request.with_header(headers::MESSAGE_SIGNATURE, signature);
    }

    let response = runtime.block_on(dispatcher.handle(&request));
    assert!(matches!(response.status, 200 | 204 | 400 | 401));
});
