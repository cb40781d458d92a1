//! In-memory bearer token store.

use parking_lot::RwLock;

/// Holds the current bearer token for one client.
///
/// The token is an opaque string; no shape validation is performed.
/// Persistence is handled separately by [`TokenCache`](crate::token_cache::TokenCache)
/// and must be invoked by the caller.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token unconditionally.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Get the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Remove the current token.
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}
