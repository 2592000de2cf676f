//! The Figma API client handle.

use super::{auth::*, FigmaError};
use serde::de::DeserializeOwned;

/// The base URL of the Figma REST API.
pub const API_BASE: &str = "https://api.figma.com/v1";

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client].
pub struct FigmaClient {
    base_url: String,
    token: FigmaAccessToken,
    http: reqwest::Client,
}

impl FigmaClient {
    pub fn new(base_url: String, token: FigmaAccessToken) -> Self {
        Self {
            base_url,
            token,
            http: reqwest::Client::new(),
        }
    }

    /// Create a GET request to any Figma API endpoint, handling authentication.
    pub(super) fn get<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .get(self.base_url.to_owned() + &path.to_string())
            .header(TOKEN_HEADER, to_auth_header_val(&self.token))
    }
}

/// Send a request and decode its JSON body. Unlike Slack, Figma signals
/// failure with the HTTP status, so anything other than a 2xx is surfaced
/// along with whatever body came back.
pub(super) async fn fetch<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T, FigmaError> {
    let res = req.send().await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(FigmaError::RemoteApi {
            status: status.as_u16(),
            body,
        });
    }

    Ok(res.json().await?)
}
