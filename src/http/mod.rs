//! Authenticated HTTP transport.
//!
//! Every request to the Danella API goes through [`HttpClient`]: it attaches
//! the current bearer token, dispatches, and on a 401 delegates to the
//! [`RefreshCoordinator`] before replaying the request exactly once.

pub mod refresh;
pub mod token;

pub use refresh::{RefreshCoordinator, TokenRefresher};
pub use token::TokenStore;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{DanellaError, DanellaResult};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP client that attaches bearer tokens and refreshes them on 401.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token_store: Arc<TokenStore>,
    refresh: Option<Arc<RefreshCoordinator>>,
}

impl HttpClient {
    /// Create a transport for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>, token_store: Arc<TokenStore>) -> DanellaResult<Self> {
        Self::with_timeout(base_url, token_store, DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token_store: Arc<TokenStore>,
        timeout: Duration,
    ) -> DanellaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DanellaError::config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_store,
            refresh: None,
        })
    }

    /// Attach a refresh coordinator. Without one, 401 responses propagate
    /// directly as authentication errors.
    #[must_use]
    pub fn with_refresh(mut self, refresh: Arc<RefreshCoordinator>) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// The token store backing this transport.
    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.token_store
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> DanellaResult<T> {
        self.request(Method::GET, path, None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> DanellaResult<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> DanellaResult<T> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Execute a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> DanellaResult<T> {
        self.request(Method::DELETE, path, None).await
    }

    /// Dispatch a request, refreshing the token and replaying once on 401.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> DanellaResult<T> {
        // A single request is auto-retried for auth at most once.
        let mut retried_for_auth = false;
        loop {
            let response = self.dispatch(&method, path, body.as_ref()).await?;
            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| DanellaError::Network(e.to_string()))?;
                return Ok(serde_json::from_str(&text)?);
            }

            let raw = response.text().await.unwrap_or_default();
            match status {
                StatusCode::UNAUTHORIZED => {
                    if !retried_for_auth {
                        if let Some(refresh) = &self.refresh {
                            debug!(%method, path, "got 401, refreshing token");
                            refresh.obtain_fresh_token().await?;
                            retried_for_auth = true;
                            continue;
                        }
                    }
                    return Err(DanellaError::Authentication(server_message(
                        &raw,
                        "Unauthorized",
                    )));
                }
                StatusCode::NOT_FOUND => {
                    return Err(DanellaError::NotFound(server_message(&raw, "Not found")));
                }
                StatusCode::BAD_REQUEST => {
                    return Err(DanellaError::Validation(server_message(&raw, "Bad request")));
                }
                _ => {
                    return Err(DanellaError::Request {
                        status: status.as_u16(),
                        body: raw,
                    });
                }
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> DanellaResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "dispatching request");

        let mut request = self.client.request(method.clone(), url.as_str());
        // Read the token fresh immediately before dispatch.
        if let Some(token) = self.token_store.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                DanellaError::Network(format!("request timed out: {e}"))
            } else {
                DanellaError::Network(e.to_string())
            }
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: String,
}

/// Extract the server-provided `message` field, falling back to a default.
fn server_message(raw: &str, default: &str) -> String {
    match serde_json::from_str::<ServerMessage>(raw) {
        Ok(parsed) => parsed.message,
        Err(_) => default.to_string(),
    }
}
