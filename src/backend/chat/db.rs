/**
 * Chat persistence
 *
 * A chat is a row holding its participants as a `uuid[]`. Views returned to
 * clients are hydrated with participant profiles and the last message in
 * two batched queries regardless of how many chats are listed.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_users_by_ids;
use crate::backend::messaging::db::get_messages_by_ids;
use crate::shared::messaging::{ChatView, MessageView, UserProfile};

const CHAT_COLUMNS: &str = "id, participants, last_message_id, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatRow {
    pub id: Uuid,
    pub participants: Vec<Uuid>,
    pub last_message_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRow {
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }
}

/// The 1-to-1 chat between both users, if one exists
pub async fn find_direct_chat(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Option<ChatRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRow>(&format!(
        r#"
        SELECT {CHAT_COLUMNS} FROM chats
        WHERE participants @> ARRAY[$1, $2]::uuid[]
          AND cardinality(participants) = 2
        ORDER BY created_at ASC
        LIMIT 1
        "#
    ))
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(pool)
    .await
}

pub async fn create_chat(pool: &PgPool, user_a: Uuid, user_b: Uuid) -> Result<ChatRow, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, ChatRow>(&format!(
        r#"
        INSERT INTO chats (id, participants, last_message_id, created_at, updated_at)
        VALUES ($1, $2, NULL, $3, $3)
        RETURNING {CHAT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(vec![user_a, user_b])
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_chat(pool: &PgPool, chat_id: Uuid) -> Result<Option<ChatRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRow>(&format!("SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1"))
        .bind(chat_id)
        .fetch_optional(pool)
        .await
}

/// Chats the user takes part in, most recently active first
pub async fn list_chats_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRow>(&format!(
        "SELECT {CHAT_COLUMNS} FROM chats WHERE $1 = ANY(participants) ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Deletes a chat and its messages. Returns `false` if the chat did not exist.
pub async fn delete_chat(pool: &PgPool, chat_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM messages WHERE chat_id = $1")
        .bind(chat_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM chats WHERE id = $1")
        .bind(chat_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}

/// Populates participants and last messages for a batch of chats, keeping order.
pub async fn hydrate_chats(pool: &PgPool, rows: Vec<ChatRow>) -> Result<Vec<ChatView>, sqlx::Error> {
    let mut user_ids: Vec<Uuid> = rows.iter().flat_map(|row| row.participants.iter().copied()).collect();
    user_ids.sort();
    user_ids.dedup();
    let message_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.last_message_id).collect();

    let users: HashMap<Uuid, UserProfile> = get_users_by_ids(pool, &user_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user.profile()))
        .collect();
    let messages: HashMap<Uuid, MessageView> = get_messages_by_ids(pool, &message_ids)
        .await?
        .into_iter()
        .map(|message| (message.id, message))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| assemble_view(row, &users, &messages))
        .collect())
}

pub async fn hydrate_chat(pool: &PgPool, row: ChatRow) -> Result<ChatView, sqlx::Error> {
    let mut views = hydrate_chats(pool, vec![row]).await?;
    views.pop().ok_or(sqlx::Error::RowNotFound)
}

/// Participants whose account no longer exists are left out.
fn assemble_view(
    row: ChatRow,
    users: &HashMap<Uuid, UserProfile>,
    messages: &HashMap<Uuid, MessageView>,
) -> ChatView {
    ChatView {
        id: row.id,
        participants: row
            .participants
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect(),
        last_message: row.last_message_id.and_then(|id| messages.get(&id).cloned()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
