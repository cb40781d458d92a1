//! Resource methods mapping to REST endpoints.

pub mod auth;
pub mod tasks;

pub use auth::{AuthResource, TokenRequest, TokenResponse};
pub use tasks::TasksResource;
