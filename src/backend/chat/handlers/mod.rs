//! Chat Handlers
//!
//! - `POST /api/chats` - `access_chat`
//! - `GET /api/chats` - `fetch_chats`
//! - `DELETE /api/chats/{chat_id}` - `delete_chat`

pub mod access;

pub mod delete;

pub use access::{access_chat, fetch_chats, AccessChatRequest};
pub use delete::delete_chat;

use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chat::db::{get_chat, ChatRow};
use crate::backend::error::BackendError;

/// Loads a chat the caller belongs to: 404 if missing, 403 if not a participant.
pub async fn chat_for_participant(
    pool: &PgPool,
    chat_id: Uuid,
    user_id: Uuid,
) -> Result<ChatRow, BackendError> {
    let chat = get_chat(pool, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chat not found"))?;

    if !chat.has_participant(user_id) {
        tracing::warn!("[Chat] User {} is not a participant of chat {}", user_id, chat_id);
        return Err(BackendError::forbidden("Not authorized"));
    }
    Ok(chat)
}
