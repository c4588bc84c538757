//! Middleware Module
//!
//! - **`auth`** - bearer-token guard for protected routes and the `AuthUser` extractor

/// Authentication middleware
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
