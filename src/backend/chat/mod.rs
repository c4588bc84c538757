//! Chat Module
//!
//! 1-to-1 chats between users: storage in `db`, `/api/chats` endpoints in
//! `handlers`. A chat's id doubles as the relay room id on the socket.

/// Chat HTTP handlers
pub mod handlers;

/// Chat persistence
pub mod db;

pub use handlers::{access_chat, delete_chat, fetch_chats};
