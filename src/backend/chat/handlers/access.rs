/**
 * Access / list chats
 *
 * `access_chat` finds the 1-to-1 chat between the caller and `userId`, or
 * creates it. `fetch_chats` lists the caller's chats, newest activity first.
 */

use axum::{extract::State, response::Json};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::chat::db::{create_chat, find_direct_chat, hydrate_chat, hydrate_chats, list_chats_for_user};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_database;
use crate::shared::error::require_text;
use crate::shared::messaging::ChatView;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessChatRequest {
    pub user_id: Option<String>,
}

pub async fn access_chat(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
    Json(request): Json<AccessChatRequest>,
) -> Result<Json<ChatView>, BackendError> {
    let other = require_text("userId", request.user_id, "UserId is required")?;
    let other = Uuid::parse_str(&other).map_err(|_| BackendError::bad_request("Invalid userId"))?;
    if other == auth_user.user_id {
        return Err(BackendError::bad_request("Cannot start a chat with yourself"));
    }
    let pool = require_database(pool)?;

    let chat = match find_direct_chat(&pool, auth_user.user_id, other).await? {
        Some(chat) => chat,
        None => {
            if get_user_by_id(&pool, other).await?.is_none() {
                return Err(BackendError::not_found("User not found"));
            }
            let chat = create_chat(&pool, auth_user.user_id, other).await?;
            tracing::info!(
                "[Chat] Created chat {} between {} and {}",
                chat.id,
                auth_user.user_id,
                other
            );
            chat
        }
    };

    Ok(Json(hydrate_chat(&pool, chat).await?))
}

pub async fn fetch_chats(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
) -> Result<Json<Vec<ChatView>>, BackendError> {
    let pool = require_database(pool)?;
    let rows = list_chats_for_user(&pool, auth_user.user_id).await?;
    Ok(Json(hydrate_chats(&pool, rows).await?))
}
