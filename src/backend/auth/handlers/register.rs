/**
 * Register Handler
 *
 * `POST /api/auth/register`
 *
 * 1. Require username, email and password
 * 2. Reject an email or unique id that is already taken
 * 3. Hash the password with bcrypt
 * 4. Store the user and return it with a fresh token (201)
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, find_conflicting_user, is_unique_violation, NewUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::{require_database, AppState};
use crate::shared::error::require_text;
use crate::shared::messaging::AuthResponse;
use crate::shared::SharedError;

const MISSING_FIELDS: &str = "Please provide all fields";

pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let username = require_text("username", request.username, MISSING_FIELDS)?;
    let email = require_text("email", request.email, MISSING_FIELDS)?.to_lowercase();
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SharedError::validation("password", MISSING_FIELDS))?;
    let unique_id = request
        .unique_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| email.clone());

    let pool = require_database(app_state.db_pool.clone())?;
    tracing::info!("[Auth] Register attempt: {} <{}> ({})", username, email, unique_id);

    if find_conflicting_user(&pool, &email, &unique_id).await?.is_some() {
        tracing::warn!("[Auth] Register rejected, user already exists: {}", email);
        return Err(BackendError::bad_request("User already exists"));
    }

    let password_hash = hash_password(password).await?;

    let user = create_user(
        &pool,
        NewUser {
            username,
            email,
            password_hash,
            unique_id,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::bad_request("User already exists")
        } else {
            BackendError::from(e)
        }
    })?;

    let token = app_state.jwt.create_token(user.id)?;
    tracing::info!("[Auth] User registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user.profile(), token))))
}
