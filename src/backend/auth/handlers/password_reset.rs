/**
 * Password Reset Handlers
 *
 * - `POST /api/auth/forgot-password` stores the SHA-256 of a random token
 *   (valid for one hour) and mails the raw token as a link
 * - `POST /api/auth/reset-password/{token}` swaps in a new password for the
 *   holder of an unexpired token and clears it
 *
 * Unknown emails get the same 200 as known ones.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::backend::auth::handlers::types::{
    ForgotPasswordRequest, MessageResponse, ResetPasswordRequest,
};
use crate::backend::auth::mailer::MailError;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{get_user_by_email, reset_password_with_token, store_reset_token};
use crate::backend::error::BackendError;
use crate::backend::server::state::{require_database, AppState};
use crate::shared::error::require_text;

pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;
pub const MIN_PASSWORD_LEN: usize = 6;

/// 64 hex chars drawn from two v4 UUIDs
pub fn generate_reset_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Only this digest is stored, never the token itself
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let email = require_text("email", request.email, "Email is required")?.to_lowercase();
    let pool = require_database(app_state.db_pool.clone())?;

    let Some(user) = get_user_by_email(&pool, &email).await? else {
        tracing::info!("[Auth] Password reset requested for unknown email");
        return Ok(Json(MessageResponse::new(
            "If that email exists, a password reset link has been sent.",
        )));
    };

    let token = generate_reset_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
    store_reset_token(&pool, user.id, &hash_reset_token(&token), expires_at).await?;

    let reset_url = format!("{}/reset-password/{}", app_state.config.frontend_url, token);
    let mailer = app_state.mailer.as_ref().ok_or(MailError::NotConfigured)?;
    mailer
        .send_password_reset(&user.email, &user.username, &reset_url)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password reset link has been sent to your email.",
    )))
}

pub async fn reset_password(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let password = request
        .password
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
        .ok_or_else(|| {
            BackendError::bad_request("Password must be at least 6 characters long")
        })?;
    let pool = require_database(app_state.db_pool.clone())?;

    let password_hash = hash_password(password).await?;
    let user = reset_password_with_token(&pool, &hash_reset_token(&token), &password_hash)
        .await?
        .ok_or_else(|| BackendError::bad_request("Invalid or expired reset token"))?;

    tracing::info!("[Auth] Password reset for user {}", user.id);
    Ok(Json(MessageResponse::new(
        "Password has been reset successfully. You can now login.",
    )))
}
