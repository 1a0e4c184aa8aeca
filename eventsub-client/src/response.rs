//! Response bodies returned by the Helix and OAuth endpoints.

use eventsub_core::Subscription;
use serde::{Deserialize, Serialize};

/// Outcome of an API call that returned a parseable body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    /// 2xx response with the expected payload.
    Success(T),
    /// Non-success response with the API's error body.
    Failure(ApiErrorBody),
}

impl<T> ApiReply<T> {
    /// Check if the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The error body, if the call failed.
    pub fn failure(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Success(_) => None,
            Self::Failure(body) => Some(body),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, ApiErrorBody> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(body) => Err(body),
        }
    }
}

/// Error body sent by Helix, e.g.
/// `{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

/// Cursor for the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Subscriptions returned by create and list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionList {
    pub data: Vec<Subscription>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_cost: u64,
    #[serde(default)]
    pub max_total_cost: u64,
    #[serde(default)]
    pub pagination: Pagination,
}

impl SubscriptionList {
    /// Cursor of the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination
            .cursor
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

/// App access token from the client-credentials exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

impl std::fmt::Debug for AppAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppAccessToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_parses_helix_body() {
        let body = json!({
            "data": [{
                "id": "26b1c993-bfcf-44d9-b876-379dacafe75a",
                "status": "enabled",
                "type": "stream.online",
                "version": "1",
                "condition": {"broadcaster_user_id": "1234"},
                "created_at": "2020-11-10T14:32:18.730260295Z",
                "transport": {"method": "webhook", "callback": "https://this-is-a-callback.com"},
                "cost": 1
            }],
            "total": 1,
            "total_cost": 1,
            "max_total_cost": 10000,
            "pagination": {}
        });

        let list: SubscriptionList = serde_json::from_value(body).unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.max_total_cost, 10000);
        assert_eq!(list.next_cursor(), None);
    }

    #[test]
    fn test_reply_accessors() {
        let ok: ApiReply<u32> = ApiReply::Success(7);
        assert!(ok.is_success());
        assert_eq!(ok.success(), Some(7));

        let failed: ApiReply<u32> = ApiReply::Failure(ApiErrorBody {
            error: "Conflict".into(),
            status: 409,
            message: "subscription already exists".into(),
        });
        assert_eq!(failed.failure().map(|body| body.status), Some(409));
        assert!(failed.into_result().is_err());
    }
}
