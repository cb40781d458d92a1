//! Single-flight token refresh.
//!
//! Concurrent 401s must trigger at most one refresh of the underlying
//! credential. The first caller to observe the failure becomes the leader and
//! runs the refresh; everyone else registers a waiter and suspends until the
//! leader fans out the result.

use crate::error::{DanellaError, DanellaResult};
use crate::http::token::TokenStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Source of fresh bearer tokens.
///
/// Supplied by the owning application; [`AuthResource`](crate::resources::AuthResource)
/// implements it by logging in again.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Obtain a brand-new token from the issuing service.
    async fn refresh(&self) -> DanellaResult<String>;
}

/// Fan-out payload. The error side carries only the message so it can be
/// cloned into every waiter.
type WaiterResult = Result<String, String>;

enum RefreshState {
    Idle,
    InFlight {
        /// Resolved in registration order when the refresh settles.
        waiters: Vec<oneshot::Sender<WaiterResult>>,
    },
}

/// Coordinates token refreshes so that only one runs at a time.
pub struct RefreshCoordinator {
    store: Arc<TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Create a coordinator that writes refreshed tokens into `store`.
    pub fn new(store: Arc<TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Get a fresh token, starting a refresh if none is underway.
    ///
    /// If a refresh is already in flight the caller suspends until it settles
    /// and receives the same outcome. A failed refresh surfaces as
    /// [`DanellaError::Authentication`] for every caller, after which the
    /// coordinator is idle again and a later 401 may start a new attempt.
    pub async fn obtain_fresh_token(&self) -> DanellaResult<String> {
        // The check-and-set happens synchronously under the lock, before any
        // await, so at most one refresh is ever in flight.
        let rx = {
            let mut state = self.state.lock();
            match &mut *state {
                RefreshState::InFlight { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                RefreshState::Idle => {
                    *state = RefreshState::InFlight { waiters: Vec::new() };
                    None
                }
            }
        };

        if let Some(rx) = rx {
            debug!("refresh already in flight, waiting for its result");
            return match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(msg)) => Err(DanellaError::Authentication(msg)),
                Err(_) => Err(DanellaError::authentication("token refresh was cancelled")),
            };
        }

        // Leader path. The guard returns the state to Idle and fans out to the
        // waiters on every exit, including cancellation of this future.
        let mut guard = InFlightGuard {
            state: &self.state,
            outcome: None,
        };

        debug!("starting token refresh");
        match self.refresher.refresh().await {
            Ok(token) => {
                self.store.set(token.clone());
                debug!("token refresh succeeded");
                guard.outcome = Some(Ok(token.clone()));
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                let msg = format!("token refresh failed: {err}");
                guard.outcome = Some(Err(msg.clone()));
                Err(DanellaError::Authentication(msg))
            }
        }
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let in_flight = matches!(*self.state.lock(), RefreshState::InFlight { .. });
        f.debug_struct("RefreshCoordinator")
            .field("in_flight", &in_flight)
            .finish()
    }
}

struct InFlightGuard<'a> {
    state: &'a Mutex<RefreshState>,
    outcome: Option<WaiterResult>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let waiters = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::InFlight { waiters } => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        let outcome = self
            .outcome
            .take()
            .unwrap_or_else(|| Err("token refresh was cancelled".to_string()));
        for tx in waiters {
            // A waiter that abandoned its wait has dropped the receiver.
            let _ = tx.send(outcome.clone());
        }
    }
}
