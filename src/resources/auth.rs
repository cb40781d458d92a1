//! Authentication against the token-issuing service.
//!
//! Login goes through the external auth proxy with a plain HTTP client: it is
//! independent of the authenticated transport and never carries a bearer token.

use crate::config::DanellaConfig;
use crate::error::{DanellaError, DanellaResult};
use crate::http::{TokenRefresher, TokenStore};
use crate::token_cache::TokenCache;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Payload sent to the auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    /// Workflow API key.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// User ID.
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Employee ID.
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    /// Display name.
    pub name: String,
}

/// Token issued by the auth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Login/logout operations and the refresh callback backing the transport.
pub struct AuthResource {
    client: reqwest::Client,
    config: DanellaConfig,
    token_store: Arc<TokenStore>,
    cache: TokenCache,
}

impl AuthResource {
    /// Create an auth resource with the default token cache location.
    pub fn new(config: DanellaConfig, token_store: Arc<TokenStore>) -> DanellaResult<Self> {
        Self::with_cache(config, token_store, TokenCache::new())
    }

    /// Create an auth resource with a custom token cache.
    pub fn with_cache(
        config: DanellaConfig,
        token_store: Arc<TokenStore>,
        cache: TokenCache,
    ) -> DanellaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DanellaError::config(e.to_string()))?;
        Ok(Self {
            client,
            config,
            token_store,
            cache,
        })
    }

    /// The on-disk token cache used by [`login_cached`](Self::login_cached).
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Authenticate and obtain an access token.
    ///
    /// On success the token is stored in the in-memory token store; persisting
    /// it to disk is up to the caller (see [`login_cached`](Self::login_cached)).
    pub async fn login(&self) -> DanellaResult<TokenResponse> {
        let payload = TokenRequest {
            api_key: self.config.api_key.clone(),
            user_id: self.config.user_id,
            employee_id: self.config.employee_id,
            name: self.config.name.clone(),
        };

        debug!(url = %self.config.auth_url, "requesting token");
        let response = self
            .client
            .post(self.config.auth_url.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DanellaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(DanellaError::Authentication(format!(
                "login failed ({}): {raw}",
                status.as_u16()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DanellaError::Network(e.to_string()))?;
        let token: TokenResponse = serde_json::from_str(&text)?;

        if !token.access_token.is_empty() {
            self.token_store.set(&token.access_token);
        }
        Ok(token)
    }

    /// Reuse a cached token when it is still valid, otherwise log in and
    /// cache the new one.
    pub async fn login_cached(&self) -> DanellaResult<String> {
        if let Some(token) = self.cache.load().await {
            self.token_store.set(&token);
            return Ok(token);
        }

        let response = self.login().await?;
        self.cache
            .save(&response.access_token, &response.token_type, response.expires_in)
            .await?;
        Ok(response.access_token)
    }

    /// Clear the current token.
    ///
    /// Known gap: a logout racing a successful refresh still unwinding may be
    /// overwritten by the refreshed token. The on-disk cache is not touched;
    /// use [`cache`](Self::cache) to clear it explicitly.
    pub fn logout(&self) {
        self.token_store.clear();
    }
}

impl std::fmt::Debug for AuthResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResource")
            .field("auth_url", &self.config.auth_url)
            .finish()
    }
}

#[async_trait]
impl TokenRefresher for AuthResource {
    async fn refresh(&self) -> DanellaResult<String> {
        let response = self.login().await?;
        Ok(response.access_token)
    }
}
