//! Backend Error Module
//!
//! - **`types`** - `BackendError` for REST handlers, `RelayError` for socket events
//! - **`conversion`** - `IntoResponse` for `BackendError`
//!
//! Handlers return `Result<_, BackendError>` and use `?` freely; database,
//! token, hashing and mail errors convert automatically.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, RelayError};
