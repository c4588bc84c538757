/**
 * Profile Handlers
 *
 * - `PUT /api/auth/update` - change username and/or avatar
 * - `GET /api/auth/all`, `GET /api/users` - every other user
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UpdateProfileRequest;
use crate::backend::auth::users::{list_users_except, update_profile as store_profile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_database;
use crate::shared::messaging::UserProfile;

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Only non-empty fields are applied; an empty body leaves the user unchanged.
pub async fn update_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    let pool = require_database(pool)?;
    let username = non_empty(request.username);
    let avatar = non_empty(request.avatar);
    tracing::info!("[Auth] Update profile: {}", auth_user.user_id);

    let user = store_profile(
        &pool,
        auth_user.user_id,
        username.as_deref(),
        avatar.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.profile()))
}

pub async fn list_users(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    let pool = require_database(pool)?;

    let users = list_users_except(&pool, auth_user.user_id).await?;
    tracing::info!(
        "[Auth] Found {} users besides {}",
        users.len(),
        auth_user.user_id
    );

    Ok(Json(users.iter().map(|user| user.profile()).collect()))
}
