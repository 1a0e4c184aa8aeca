//! Compute the signature header for a message, for testing a receiver by hand.

use crate::error::{CliError, CliResult};
use eventsub_webhooks::WebhookSignature;

pub fn run(id: &str, timestamp: &str, body: &str, secret: &str) -> CliResult<()> {
    if secret.is_empty() {
        return Err(CliError::InvalidArgument("secret must not be empty".to_string()));
    }

    println!("{}", signature(id, timestamp, body, secret));
    Ok(())
}

fn signature(id: &str, timestamp: &str, body: &str, secret: &str) -> String {
    WebhookSignature::new(secret).sign(id, timestamp, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventsub_webhooks::hmac_hex;

    #[test]
    fn test_signature_covers_id_timestamp_and_body() {
        let sig = signature("msg-1", "2023-07-19T10:11:12.634234626Z", "{}", "s3cRe7");
        let expected = format!(
            "sha256={}",
            hmac_hex("s3cRe7", "msg-12023-07-19T10:11:12.634234626Z{}")
        );
        assert_eq!(sig, expected);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(run("id", "ts", "{}", "").is_err());
    }
}
