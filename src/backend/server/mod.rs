//! Server Module
//!
//! - **`config`** - `ServerConfig` from the environment, database loading
//! - **`state`** - `AppState` and its `FromRef` impls
//! - **`init`** - `create_app`, which wires state into the router

/// Application state management
pub mod state;

/// Server configuration
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
