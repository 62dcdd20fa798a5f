//! HTTP client for the Servly REST API.
//!
//! [`ApiClient`] owns the `reqwest` client, base URL and optional bearer
//! token. Endpoint groups are exposed through the [`DocumentApi`] and
//! [`UserApi`] traits so screens and commands can be exercised against
//! in-memory fakes.

mod documents;
mod users;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;

pub use documents::DocumentApi;
pub use users::UserApi;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API responded with {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Message suitable for a notification, when the failure carries one.
    ///
    /// Server-provided messages win; transport errors fall back to their own
    /// description. A bare non-2xx status carries no message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Transport(err) => Some(err.to_string()),
            Self::Decode(_) => None,
        }
    }
}

/// Shape of JSON error bodies returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = send(request).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = send(request).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// PATCH a JSON body. Only the status is inspected, the body is ignored.
    pub(crate) async fn patch_json<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: serde::Serialize + Sync,
    {
        let request = self.authorize(self.client.patch(self.url(path)).json(body));
        send(request).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(ApiError::Transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = extract_message(&text);
    tracing::debug!(%status, ?message, "API request failed");
    Err(ApiError::Status { status, message })
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty()),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"File too large","error":"x"}"#).as_deref(),
            Some("File too large")
        );
        assert_eq!(
            extract_message(r#"{"error":"Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(extract_message(r#"{"message":"  "}"#), None);
        assert_eq!(extract_message(""), None);
        assert_eq!(
            extract_message("Bad Gateway").as_deref(),
            Some("Bad Gateway")
        );
    }

    #[test]
    fn test_status_error_display() {
        let with_message = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some("Invalid role".to_string()),
        };
        assert_eq!(
            with_message.to_string(),
            "API responded with 400 Bad Request: Invalid role"
        );
        assert_eq!(with_message.user_message().as_deref(), Some("Invalid role"));

        let bare = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(bare.to_string(), "API responded with 500 Internal Server Error");
        assert!(bare.user_message().is_none());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ApiConfig {
            base_url: "https://api.servly.test/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://api.servly.test");
        assert_eq!(client.url("/api/users/1"), "https://api.servly.test/api/users/1");
    }
}
