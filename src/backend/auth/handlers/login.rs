/**
 * Login Handler
 *
 * `POST /api/auth/login`
 *
 * Unknown email and wrong password both answer 401 "Invalid credentials"
 * so the response does not reveal which accounts exist.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::LoginRequest;
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::{require_database, AppState};
use crate::shared::error::require_text;
use crate::shared::messaging::AuthResponse;
use crate::shared::SharedError;

const MISSING_FIELDS: &str = "Please provide email and password";

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let email = require_text("email", request.email, MISSING_FIELDS)?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SharedError::validation("password", MISSING_FIELDS))?;

    let pool = require_database(app_state.db_pool.clone())?;
    tracing::info!("[Auth] Login attempt: {}", email);

    let user = get_user_by_email(&pool, &email).await?.ok_or_else(|| {
        tracing::warn!("[Auth] User not found: {}", email);
        BackendError::unauthorized("Invalid credentials")
    })?;

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!("[Auth] Invalid password for: {}", email);
        return Err(BackendError::unauthorized("Invalid credentials"));
    }

    let token = app_state.jwt.create_token(user.id)?;
    tracing::info!("[Auth] User logged in: {}", user.id);

    Ok(Json(AuthResponse::new(user.profile(), token)))
}
