//! Shared Module
//!
//! Serializable types that travel over the socket and the REST API.

/// Socket event frames
pub mod event;

/// Shared error types
pub mod error;

/// User, chat and message views
pub mod messaging;

pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent};
