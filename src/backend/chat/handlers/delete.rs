use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::chat_for_participant;
use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::chat::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_database;

/// `DELETE /api/chats/{chat_id}`: only participants may delete; messages go with the chat.
pub async fn delete_chat(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = require_database(pool)?;
    chat_for_participant(&pool, chat_id, auth_user.user_id).await?;

    if !db::delete_chat(&pool, chat_id).await? {
        return Err(BackendError::not_found("Chat not found"));
    }

    tracing::info!("[Chat] Chat {} deleted by {}", chat_id, auth_user.user_id);
    Ok(Json(MessageResponse::new("Chat deleted successfully")))
}
