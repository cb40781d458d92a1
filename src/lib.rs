//! # danella-sdk
//!
//! Async client for the Danella task-management API.
//!
//! The client authenticates against an external auth proxy, keeps the bearer
//! token in memory (optionally cached on disk), and exposes typed methods for
//! the tasks endpoints. When a request comes back 401, the transport refreshes
//! the token exactly once, no matter how many requests are in flight, and
//! replays each waiting request with the new token.
//!
//! ## Core Concepts
//!
//! - **[`DanellaClient`]**: owns token state and wires everything together
//! - **[`HttpClient`](http::HttpClient)**: authenticated transport with
//!   single-flight refresh on 401
//! - **[`TokenCache`](token_cache::TokenCache)**: on-disk token reuse with a
//!   five-minute expiry safety buffer
//! - **[`TokenRefresher`](http::TokenRefresher)**: injectable refresh callback;
//!   [`AuthResource`](resources::AuthResource) implements it by logging in again
//!
//! ## Example
//!
//! ```ignore
//! use danella_sdk::{DanellaClient, DanellaConfig, TaskCreateDto};
//!
//! let config = DanellaConfig::new(api_key, user_id, employee_id, name);
//! let client = DanellaClient::new(config)?;
//!
//! // Reuse the cached token, or log in and cache a fresh one.
//! client.auth().login_cached().await?;
//!
//! let fields = client.tasks().project_secondary_fields(1).await?;
//! let task = client.tasks().update(&TaskCreateDto {
//!     sub_project_id: Some(41),
//!     job_id: Some("TEST-001".into()),
//!     ..Default::default()
//! }).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod token_cache;
pub mod types;

pub use client::DanellaClient;
pub use config::{DanellaConfig, AUTH_ENDPOINT, DEFAULT_BASE_URL};
pub use error::{DanellaError, DanellaResult};
pub use http::{HttpClient, RefreshCoordinator, TokenRefresher, TokenStore};
pub use resources::{AuthResource, TasksResource, TokenRequest, TokenResponse};
pub use token_cache::TokenCache;
pub use types::{SecondaryFieldDto, TaskCreateDto, TaskResponse, TaskSecondaryFieldValue};
