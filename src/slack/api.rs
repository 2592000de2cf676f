//! Type definitions and helpers for the Slack Web API.

use super::auth::*;
use serde::de::{Deserialize, Deserializer, Error};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A handle on the Slack Web API for a single bot installation.
///
/// Holds a connection pool internally, as per [reqwest::Client], so it's
/// constructed once at startup and shared across requests.
pub struct SlackClient {
    base_url: String,
    token: SlackAccessToken,
    http: reqwest::Client,
}

impl SlackClient {
    pub fn new(base_url: String, token: SlackAccessToken) -> Self {
        Self {
            base_url,
            token,
            http: reqwest::Client::new(),
        }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub(super) fn post<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(self.base_url.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "ts": "1503435956.000247"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "channel_not_found"
/// }
/// ```
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
#[derive(serde::Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "only_false")]
    ok: bool,
    pub error: String,
}

pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    bool::deserialize(deserializer).and_then(|b| {
        if b {
            Ok(b)
        } else {
            Err(Error::custom("invalid bool: false"))
        }
    })
}

pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    bool::deserialize(deserializer).and_then(|b| {
        if b {
            Err(Error::custom("invalid bool: true"))
        } else {
            Ok(b)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct Posted {
        #[serde(deserialize_with = "only_true")]
        ok: bool,
        ts: String,
    }

    #[test]
    fn test_only_true() {
        assert_eq!(
            serde_json::from_str::<Posted>(r#"{"ok": true, "ts": "1.2"}"#).unwrap(),
            Posted {
                ok: true,
                ts: "1.2".into()
            },
        );

        assert!(serde_json::from_str::<Posted>(r#"{"ok": false, "ts": "1.2"}"#).is_err());
    }

    #[test]
    fn test_api_result_error_envelope() {
        let res: APIResult<Posted> =
            serde_json::from_str(r#"{"ok": false, "error": "not_in_channel"}"#).unwrap();

        match res {
            APIResult::Err(e) => assert_eq!(e.error, "not_in_channel"),
            APIResult::Ok(_) => panic!("expected the error envelope"),
        }
    }

    #[test]
    fn test_api_result_rejects_inconsistent_envelope() {
        // `ok: true` with an error but no payload matches neither variant.
        assert!(
            serde_json::from_str::<APIResult<Posted>>(r#"{"ok": true, "error": "huh"}"#).is_err()
        );
    }
}
