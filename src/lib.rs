//! Chat Relay - Main Library
//!
//! A realtime chat backend: a WebSocket relay that tracks which users are
//! online and fans events out to chat rooms, plus a JSON REST API for
//! accounts, 1-to-1 chats and message history stored in Postgres.
//!
//! # Module Structure
//!
//! - **`shared`** - wire types used by both the socket and the REST API
//!   - socket event frames (`ClientEvent`, `ServerEvent`)
//!   - user, chat and message views
//!   - validation errors
//!
//! - **`backend`** - server-side code (only compiled with `ssr`)
//!   - the relay hub (connections, presence, rooms, fan-out)
//!   - Axum routes, auth middleware, JWT sessions
//!   - Postgres persistence via sqlx
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend and its server dependencies
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatrelay::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Socket Protocol
//!
//! Every frame is a JSON text message `{"event": "<name>", "data": ...}`.
//! Clients send `identify`, `join-room`, `leave-room`, `relay-message`,
//! `typing-start`, `typing-stop` and `seen`; the server sends
//! `presence-changed`, `message-received`, `user-typing`,
//! `user-stopped-typing` and `message-seen`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
