//! Shared HTTP client

use crate::config::FileApiConfig;
use assessgen_application::GatewayError;
use assessgen_domain::core::string::truncate;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest raw body quoted in an error message
const MAX_ERROR_BODY: usize = 200;

/// Header carrying the workflow run id on submission
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// One `reqwest::Client` plus the settings every request needs
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn from_config(config: &FileApiConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("assessgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.send(self.http.get(&url)).await
    }

    pub async fn post_json<T>(
        &self,
        path: &str,
        body: &T,
        idempotency_key: Option<&str>,
    ) -> Result<Value, GatewayError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let mut request = self.http.post(&url).json(body);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }
        self.send(request).await
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<Value, GatewayError> {
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        parse_body(&text)
    }
}

/// Join a base URL and an endpoint path with exactly one `/`
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pull a human-readable message out of an error body
pub fn error_message(body: &Value) -> Option<String> {
    for key in ["message", "error", "detail"] {
        match body.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Object(_)) => {
                if let Some(inner) = body.get(key).and_then(error_message) {
                    return Some(inner);
                }
            }
            _ => {}
        }
    }
    None
}

/// Map a non-2xx response. Client errors that carry a message are
/// `Rejected` so the message reaches the user verbatim.
pub fn status_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_message);

    match message {
        Some(message) if (400..500).contains(&status) => GatewayError::Rejected(message),
        Some(message) => GatewayError::RequestFailed { status, message },
        None => GatewayError::RequestFailed {
            status,
            message: truncate(body.trim(), MAX_ERROR_BODY),
        },
    }
}

/// Parse a 2xx body; an empty body is `null`
pub fn parse_body(text: &str) -> Result<Value, GatewayError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        GatewayError::InvalidResponse(format!(
            "{} (body: {})",
            e,
            truncate(text.trim(), MAX_ERROR_BODY)
        ))
    })
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}
