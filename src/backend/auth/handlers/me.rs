/**
 * Current User Handler
 *
 * `GET /api/auth/me` returns the authenticated user's profile.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_database;
use crate::shared::messaging::UserProfile;

pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth_user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let pool = require_database(pool)?;

    let user = get_user_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", auth_user.user_id);
            BackendError::not_found("User not found")
        })?;

    Ok(Json(user.profile()))
}
