//! HTTP backend over `reqwest`

use crate::auth::AuthContext;
use crate::backend::{AdminBackend, Method, Mutation, MutationOutcome};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use backoffice_core::config::ApiConfig;
use reqwest::{Client, RequestBuilder, Response, header};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Admin backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend from API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::configuration("base URL is empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn authorize(request: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
        match auth.bearer() {
            Some(bearer) => request.header(header::AUTHORIZATION, bearer),
            None => request,
        }
    }

    /// Read the body, turning non-2xx statuses into errors
    async fn read_body(response: Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), server_message(&text)));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull a human readable message out of an error body
fn server_message(text: &str) -> Option<String> {
    let body: Value = serde_json::from_str(text).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl AdminBackend for HttpBackend {
    async fn get_json(&self, auth: &AuthContext, path: &str) -> ClientResult<Value> {
        let url = self.url(path);
        let start = Instant::now();
        debug!(%url, "GET");

        let request = Self::authorize(self.client.get(&url), auth);
        let result = Self::read_body(request.send().await?).await;

        match &result {
            Ok(_) => debug!(%url, elapsed_ms = start.elapsed().as_millis(), "GET succeeded"),
            Err(e) => warn!(%url, error = %e, retryable = e.is_retryable(), "GET failed"),
        }
        result
    }

    async fn send(&self, auth: &AuthContext, mutation: &Mutation) -> ClientResult<MutationOutcome> {
        let url = self.url(&mutation.path);
        debug!(method = %mutation.method, %url, "sending mutation");

        let request = match mutation.method {
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Post => self.client.post(&url),
        };
        let request = match &mutation.body {
            Some(body) => request.json(body),
            None => request,
        };
        let request = Self::authorize(request, auth);

        match Self::read_body(request.send().await?).await {
            Ok(body) => Ok(MutationOutcome::from_body(body)),
            Err(e) => {
                warn!(method = %mutation.method, %url, error = %e, "mutation failed");
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            ..ApiConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "https://api.example.com");
        assert_eq!(
            backend.url("/travel/admin/trips"),
            "https://api.example.com/travel/admin/trips"
        );
        assert_eq!(backend.url("travel/matches"), "https://api.example.com/travel/matches");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ApiConfig {
            base_url: "  ".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ClientError::Configuration { .. })
        ));
    }

    #[test]
    fn test_server_message_keys() {
        assert_eq!(
            server_message(r#"{"message": "Already approved"}"#).as_deref(),
            Some("Already approved")
        );
        assert_eq!(
            server_message(r#"{"success": false, "error": "Not allowed"}"#).as_deref(),
            Some("Not allowed")
        );
        assert_eq!(server_message(r#"{"detail": "Not found."}"#).as_deref(), Some("Not found."));
        assert_eq!(server_message(r#"{"message": ""}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }
}
