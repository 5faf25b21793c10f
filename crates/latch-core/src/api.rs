//! Authentication endpoint client
//!
//! The endpoint is an opaque HTTP service: it receives the credentials as a
//! JSON object and answers with a JSON body carrying a `success` flag and an
//! optional `message`. Any HTTP status is read; a login only succeeds when the
//! status is 2xx and the body says `"success": true`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value as JsonValue;

use crate::config::ConfigError;
use crate::credentials::Credentials;
use crate::error::{LoginError, Result};

/// Remote credential check
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Submit credentials; `Ok(())` means the server accepted them
    async fn login(&self, credentials: &Credentials) -> Result<()>;
}

/// Decoded response body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginResult {
    pub success: bool,
    pub message: Option<String>,
}

impl LoginResult {
    /// Decode a response body.
    ///
    /// Malformed JSON or a missing/non-boolean `success` decodes as a
    /// rejection; blank messages are dropped.
    pub fn from_body(body: &[u8]) -> Self {
        let value: JsonValue = serde_json::from_slice(body).unwrap_or(JsonValue::Null);

        let success = value
            .get("success")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);

        let message = value
            .get("message")
            .and_then(JsonValue::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string);

        Self { success, message }
    }

    /// Combine with the HTTP status into the final verdict
    pub fn into_outcome(self, status: StatusCode) -> Result<()> {
        if status.is_success() && self.success {
            Ok(())
        } else {
            Err(LoginError::AuthRejected {
                message: self.message,
            })
        }
    }
}

/// [`AuthClient`] backed by an HTTP POST
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: Client,
    endpoint: Url,
}

impl HttpAuthClient {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: &str) -> std::result::Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;

        let client = Client::builder()
            .user_agent(concat!("latch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Parse an endpoint URL, accepting only http and https
pub fn parse_endpoint(endpoint: &str) -> std::result::Result<Url, ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidEndpoint(format!(
            "{}: unsupported scheme '{}'",
            endpoint, scheme
        ))),
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(credentials)
            .send()
            .await
            .map_err(|e| LoginError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LoginError::Transport(e.to_string()))?;

        let result = LoginResult::from_body(&body);
        tracing::debug!(
            %status,
            success = result.success,
            has_message = result.message.is_some(),
            "Authentication endpoint responded"
        );

        result.into_outcome(status)
    }
}
