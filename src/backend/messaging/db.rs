/**
 * Message persistence
 *
 * Messages are always read back joined with their sender, so every query
 * here yields `MessageView`s ready to serialize.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::messaging::{MessageView, UserSummary};

const MESSAGE_WITH_SENDER: &str = r#"
    SELECT m.id, m.chat_id, m.text, m.created_at,
           u.id AS sender_id, u.username AS sender_username,
           u.unique_id AS sender_unique_id, u.avatar AS sender_avatar
    FROM messages m
    JOIN users u ON u.id = m.sender_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct MessageWithSender {
    id: Uuid,
    chat_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    sender_id: Uuid,
    sender_username: String,
    sender_unique_id: String,
    sender_avatar: String,
}

impl From<MessageWithSender> for MessageView {
    fn from(row: MessageWithSender) -> Self {
        MessageView {
            id: row.id,
            chat_id: row.chat_id,
            sender: UserSummary {
                id: row.sender_id,
                username: row.sender_username,
                unique_id: row.sender_unique_id,
                avatar: row.sender_avatar,
            },
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// Stores a message and makes it the chat's last message in one transaction.
pub async fn create_message(
    pool: &PgPool,
    chat_id: Uuid,
    sender_id: Uuid,
    text: &str,
) -> Result<MessageView, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO messages (id, chat_id, sender_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(chat_id)
    .bind(sender_id)
    .bind(text)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE chats SET last_message_id = $2, updated_at = $3 WHERE id = $1")
        .bind(chat_id)
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    let message = sqlx::query_as::<_, MessageWithSender>(&format!(
        "{MESSAGE_WITH_SENDER} WHERE m.id = $1"
    ))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(message.into())
}

/// Messages of a chat, oldest first
pub async fn list_messages_for_chat(
    pool: &PgPool,
    chat_id: Uuid,
) -> Result<Vec<MessageView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MessageWithSender>(&format!(
        "{MESSAGE_WITH_SENDER} WHERE m.chat_id = $1 ORDER BY m.created_at ASC, m.id ASC"
    ))
    .bind(chat_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MessageView::from).collect())
}

pub async fn get_messages_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<MessageView>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, MessageWithSender>(&format!(
        "{MESSAGE_WITH_SENDER} WHERE m.id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MessageView::from).collect())
}
