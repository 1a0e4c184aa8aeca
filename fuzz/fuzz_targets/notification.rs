//! Fuzz target for notification body parsing.
//!
//! Any JSON object must either parse into a notification or be rejected
//! with an error; typed event decoding never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

use eventsub_core::{EventType, Notification, Revocation};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    if let Ok(notification) = Notification::from_value(value.clone()) {
        let name = notification.event_type_name().to_string();
        if let Ok(event_type) = name.parse::<EventType>() {
            assert_eq!(event_type.as_str(), name);
        }
    }

    let _ = serde_json::from_value::<Revocation>(value);
});
