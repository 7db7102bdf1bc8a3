//! Request and response bodies for the HTTP API.
//!
//! | Endpoint | Request | Response |
//! |----------|---------|----------|
//! | `POST /api/token` | [`TokenRequest`] | [`TokenResponse`] |
//! | `POST /api/subscribe` | [`SubscribeRequest`] | [`SubscribeResponse`] |
//!
//! Failures on either endpoint return an [`ErrorBody`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Body of `POST /api/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TokenRequest {
    /// The case the candidate selected.
    #[serde(rename = "caseId")]
    pub case_id: String,
}

/// Successful response of `POST /api/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TokenResponse {
    /// Signed room access credential.
    pub token: String,
}

/// Body of `POST /api/subscribe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SubscribeRequest {
    /// Address to add to the mailing list.
    #[validate(email)]
    pub email: String,
}

/// Successful response of `POST /api/subscribe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SubscribeResponse {
    /// Always `true`; failures use [`ErrorBody`].
    pub success: bool,
    /// Set when the address was already on the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

impl SubscribeResponse {
    /// Message returned for a repeat submission.
    pub const ALREADY_SUBSCRIBED: &'static str = "Already subscribed";

    /// A fresh subscription.
    pub const fn subscribed() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// The address was already on the list. Still a success.
    pub fn already_subscribed() -> Self {
        Self {
            success: true,
            message: Some(String::from(Self::ALREADY_SUBSCRIBED)),
        }
    }
}

/// JSON error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorBody {
    /// User-facing error text.
    pub error: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_request_validates_email() {
        let good = SubscribeRequest {
            email: String::from("candidate@example.com"),
        };
        assert!(good.validate().is_ok());

        let bad = SubscribeRequest {
            email: String::from("not-an-email"),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn fresh_subscription_omits_message() {
        let json = serde_json::to_string(&SubscribeResponse::subscribed()).unwrap_or_default();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn repeat_subscription_carries_message() {
        let value =
            serde_json::to_value(SubscribeResponse::already_subscribed()).unwrap_or_default();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Already subscribed");
    }

    #[test]
    fn token_request_uses_camel_case() {
        let req: Result<TokenRequest, _> = serde_json::from_str(r#"{"caseId":"art_museum"}"#);
        assert_eq!(req.ok().map(|r| r.case_id), Some(String::from("art_museum")));
    }
}
