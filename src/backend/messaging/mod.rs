//! Messaging Module
//!
//! Message storage (`db`) and the `/api/messages` endpoints (`handlers`).

/// Message HTTP handlers
pub mod handlers;

/// Message persistence
pub mod db;

pub use handlers::{get_messages, send_message, SendMessageRequest};
