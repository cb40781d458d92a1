//! Top-level client.

use crate::config::DanellaConfig;
use crate::error::DanellaResult;
use crate::http::{HttpClient, RefreshCoordinator, TokenStore};
use crate::resources::{AuthResource, TasksResource};
use crate::token_cache::TokenCache;
use std::sync::Arc;

/// Client for the Danella API.
///
/// Each client owns its token state, so multiple independent clients can live
/// in one process. When `auto_refresh` is enabled (the default), a 401 on any
/// request triggers a single-flight re-login and the request is replayed once
/// with the fresh token.
///
/// # Example
///
/// ```ignore
/// use danella_sdk::{DanellaClient, DanellaConfig};
///
/// let client = DanellaClient::new(DanellaConfig::new(api_key, user_id, employee_id, name))?;
/// client.auth().login_cached().await?;
///
/// let task = client.tasks().by_id(6394).await?;
/// println!("{}", task.task_code);
/// ```
#[derive(Debug)]
pub struct DanellaClient {
    http: Arc<HttpClient>,
    auth: Arc<AuthResource>,
    tasks: TasksResource,
}

impl DanellaClient {
    /// Create a client with the default token cache location.
    pub fn new(config: DanellaConfig) -> DanellaResult<Self> {
        Self::with_token_cache(config, TokenCache::new())
    }

    /// Create a client with a custom on-disk token cache.
    pub fn with_token_cache(config: DanellaConfig, cache: TokenCache) -> DanellaResult<Self> {
        let store = Arc::new(TokenStore::new());
        let auth = Arc::new(AuthResource::with_cache(
            config.clone(),
            store.clone(),
            cache,
        )?);

        let mut http = HttpClient::with_timeout(&config.base_url, store.clone(), config.timeout)?;
        if config.auto_refresh {
            let coordinator = RefreshCoordinator::new(store, auth.clone());
            http = http.with_refresh(Arc::new(coordinator));
        }
        let http = Arc::new(http);

        Ok(Self {
            tasks: TasksResource::new(http.clone()),
            auth,
            http,
        })
    }

    /// Authentication operations.
    pub fn auth(&self) -> &AuthResource {
        &self.auth
    }

    /// Task endpoints.
    pub fn tasks(&self) -> &TasksResource {
        &self.tasks
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.http.token_store().get()
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
