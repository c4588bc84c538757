//! User records and queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::messaging::{UserProfile, UserSummary};

/// Columns selected for a `User`. Reset-token fields are never loaded.
const USER_COLUMNS: &str =
    "id, username, email, password_hash, unique_id, avatar, created_at, updated_at";

/// User row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Always stored lowercase
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Public handle other users search by; defaults to the email
    pub unique_id: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            unique_id: self.unique_id.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            unique_id: self.unique_id.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub unique_id: String,
}

pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, unique_id, avatar, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, '', $6, $6)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new_user.username)
    .bind(new_user.email.to_lowercase())
    .bind(&new_user.password_hash)
    .bind(&new_user.unique_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// A user already holding this email or unique id, if any
pub async fn find_conflicting_user(
    pool: &PgPool,
    email: &str,
    unique_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR unique_id = $2 LIMIT 1"
    ))
    .bind(email.to_lowercase())
    .bind(unique_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_users_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"))
        .bind(ids)
        .fetch_all(pool)
        .await
}

/// Every user except `id`, oldest account first
pub async fn list_users_except(pool: &PgPool, id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id <> $1 ORDER BY created_at ASC"
    ))
    .bind(id)
    .fetch_all(pool)
    .await
}

/// Applies whichever of `username` / `avatar` is given. `None` if the user is gone.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    username: Option<&str>,
    avatar: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = COALESCE($2, username),
            avatar = COALESCE($3, avatar),
            updated_at = $4
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(username)
    .bind(avatar)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

pub async fn store_reset_token(
    pool: &PgPool,
    id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET reset_token_hash = $2, reset_token_expires_at = $3, updated_at = $4
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(token_hash)
    .bind(expires_at)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Sets a new password for the holder of an unexpired reset token and
/// clears the token. `None` if no such token exists.
pub async fn reset_password_with_token(
    pool: &PgPool,
    token_hash: &str,
    password_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET password_hash = $2,
            reset_token_hash = NULL,
            reset_token_expires_at = NULL,
            updated_at = $3
        WHERE reset_token_hash = $1 AND reset_token_expires_at > $3
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(token_hash)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// True when the error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
