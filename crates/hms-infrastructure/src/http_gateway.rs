//! HTTP gateway implementation.
//!
//! Wraps every outbound call to the hospital-management backend: joins the
//! configured base URL, attaches the current bearer token when one is
//! present, and normalizes transport and application failures into
//! [`ConsoleError`].

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use hms_core::error::{ConsoleError, Result};
use hms_core::gateway::ApiGateway;
use hms_core::session::SessionContext;

use crate::config::ClientConfig;

/// reqwest-backed [`ApiGateway`].
///
/// Absence of a token results in an unauthenticated request, not a local
/// failure; the server decides whether the endpoint requires
/// authentication. No automatic retry, no token refresh, no explicit
/// deadline beyond the transport default.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    context: SessionContext,
}

impl HttpGateway {
    /// Creates a gateway over an explicit base URL.
    pub fn new(base_url: impl Into<String>, context: SessionContext) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            context,
        }
    }

    /// Creates a gateway from the loaded client configuration.
    pub fn from_config(config: &ClientConfig, context: SessionContext) -> Self {
        Self::new(config.base_url.clone(), context)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.endpoint(path);

        let mut request = self.client.request(method, &url);
        if let Some(token) = self.context.current_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|err| {
            ConsoleError::network(format!("request to {} failed: {}", url, err))
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(map_http_error(status, &text));
        }

        // Some endpoints (e.g. deactivation) answer 2xx with no body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}

/// Maps a non-2xx response to an [`ConsoleError::Api`], extracting the
/// body's `message` field when present.
fn map_http_error(status: StatusCode, body: &str) -> ConsoleError {
    let server_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        });
    ConsoleError::api_from_status(status.as_u16(), server_message)
}
