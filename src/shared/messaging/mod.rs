//! Messaging Module
//!
//! JSON shapes returned by the REST API for users, chats and messages.
//! Keys follow the browser client's expectations (`_id`, camelCase).
//!
//! ```rust
//! use chatrelay::shared::messaging::{ChatView, MessageView, UserProfile, UserSummary};
//! ```

pub mod chat;
pub mod message;
pub mod user;

pub use chat::ChatView;
pub use message::MessageView;
pub use user::{AuthResponse, UserProfile, UserSummary};
