//! File-backed token cache.
//!
//! Tokens are written as JSON next to the working directory so a short-lived
//! process can reuse a still-valid token instead of logging in again.

use crate::error::DanellaResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default cache file name, relative to the working directory.
pub const TOKEN_CACHE_FILE: &str = ".token-cache.json";

/// Safety buffer: a token is treated as expired five minutes early.
const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize)]
struct CachedToken {
    access_token: String,
    token_type: String,
    expires_in: i64,
    /// Unix timestamp in milliseconds when the token was cached.
    cached_at: i64,
}

impl CachedToken {
    /// Whether the token is still usable at `now_ms`, honoring the buffer.
    fn is_fresh(&self, now_ms: i64) -> bool {
        let expires_at = self.cached_at + self.expires_in * 1000;
        now_ms < expires_at - EXPIRY_BUFFER_MS
    }
}

/// File-backed store for one cached token.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    /// Cache at the default path in the working directory.
    pub fn new() -> Self {
        Self::at(TOKEN_CACHE_FILE)
    }

    /// Cache at a custom path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file backing this cache.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a token together with its lifetime.
    pub async fn save(
        &self,
        access_token: &str,
        token_type: &str,
        expires_in: i64,
    ) -> DanellaResult<()> {
        let cached = CachedToken {
            access_token: access_token.to_string(),
            token_type: token_type.to_string(),
            expires_in,
            cached_at: chrono::Utc::now().timestamp_millis(),
        };
        let json = serde_json::to_vec_pretty(&cached)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "token cached");
        Ok(())
    }

    /// Load the cached token if present and still valid.
    ///
    /// A missing or unreadable file is a cache miss, not an error.
    pub async fn load(&self) -> Option<String> {
        let data = tokio::fs::read(&self.path).await.ok()?;
        let cached: CachedToken = serde_json::from_slice(&data).ok()?;

        let now = chrono::Utc::now().timestamp_millis();
        if cached.is_fresh(now) {
            let expires_at = cached.cached_at + cached.expires_in * 1000;
            debug!(
                remaining_secs = (expires_at - now) / 1000,
                "using cached token"
            );
            Some(cached.access_token)
        } else {
            debug!("cached token expired or about to expire");
            None
        }
    }

    /// Delete the cache file. Deleting a nonexistent file is a no-op.
    pub async fn clear(&self) {
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}
