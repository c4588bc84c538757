/**
 * Message Handlers
 *
 * - `POST /api/messages` stores a message in a chat the caller belongs to
 * - `GET /api/messages/{chat_id}` returns the chat's history, oldest first
 *
 * Storing a message does not push it to sockets; the sending client relays
 * the returned message with `relay-message`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chat::handlers::chat_for_participant;
use crate::backend::error::BackendError;
use crate::backend::messaging::db;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_database;
use crate::shared::messaging::MessageView;

const MISSING_FIELDS: &str = "chatId and text are required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub chat_id: Option<String>,
    pub text: Option<String>,
}

pub async fn send_message(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageView>), BackendError> {
    let (Some(chat_id), Some(text)) = (
        request.chat_id.filter(|id| !id.is_empty()),
        request.text.filter(|text| !text.is_empty()),
    ) else {
        return Err(BackendError::bad_request(MISSING_FIELDS));
    };
    let chat_id = Uuid::parse_str(&chat_id).map_err(|_| BackendError::bad_request("Invalid chatId"))?;
    let pool = require_database(pool)?;

    chat_for_participant(&pool, chat_id, auth_user.user_id).await?;
    let message = db::create_message(&pool, chat_id, auth_user.user_id, &text).await?;

    tracing::debug!("[Chat] Message {} stored in chat {}", message.id, chat_id);
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_messages(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<MessageView>>, BackendError> {
    let pool = require_database(pool)?;
    chat_for_participant(&pool, chat_id, auth_user.user_id).await?;

    let messages = db::list_messages_for_chat(&pool, chat_id).await?;
    Ok(Json(messages))
}
