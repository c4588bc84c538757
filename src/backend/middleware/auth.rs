/**
 * Authentication Middleware
 *
 * Guards protected routes. Reads `Authorization: Bearer <jwt>`, verifies it,
 * checks the user still exists (when a database is configured) and stores
 * an `AuthenticatedUser` in the request extensions for `AuthUser` to pick up.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::bearer_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing or malformed Authorization header");
            BackendError::unauthorized("Unauthorized: No token provided")
        })?;

    let user_id = app_state.jwt.user_id_from_token(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {}", e);
        BackendError::unauthorized("Unauthorized: Invalid token")
    })?;

    if let Some(pool) = &app_state.db_pool {
        if get_user_by_id(pool, user_id).await?.is_none() {
            tracing::warn!("[Auth] Token for unknown user {}", user_id);
            return Err(BackendError::unauthorized("Unauthorized: User not found"));
        }
    }

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Extractor for the user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Unauthorized: No token provided")
            })?;

        Ok(AuthUser(user))
    }
}
