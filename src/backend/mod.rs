//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the WebSocket relay and the
//! Postgres-backed REST API. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - configuration, `AppState`, `create_app`
//! - **`routes`** - router assembly, CORS, fallback
//! - **`realtime`** - the relay hub: connections, presence, rooms, fan-out
//! - **`auth`** - users, JWT sessions, passwords, reset mail
//! - **`chat`** - 1-to-1 chats
//! - **`messaging`** - chat messages
//! - **`middleware`** - bearer-token authentication
//! - **`error`** - `BackendError` and `RelayError`
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - binary entry point
//! ├── server/         - config, state, init
//! ├── routes/         - router, api_routes, realtime_routes
//! ├── realtime/       - relay hub and socket handling
//! ├── auth/           - authentication
//! ├── chat/           - chat storage and handlers
//! ├── messaging/      - message storage and handlers
//! ├── middleware/     - auth middleware
//! └── error/          - error types
//! ```
//!
//! # State
//!
//! `AppState` is cloned into every handler. It owns the `RelayHub` (one
//! per server, shared by all sockets), the optional `PgPool`, the JWT keys
//! and the optional mailer. Without a database the relay keeps working and
//! the data endpoints answer 503.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat storage and endpoints
pub mod chat;

/// WebSocket relay
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Chat messages
pub mod messaging;

pub use error::{BackendError, RelayError};
pub use realtime::RelayHub;
pub use server::{create_app, AppState, ServerConfig};
