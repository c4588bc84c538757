/**
 * API Routes
 *
 * ## Public
 * - `POST /api/auth/register`
 * - `POST /api/auth/login`
 * - `POST /api/auth/forgot-password`
 * - `POST /api/auth/reset-password/{token}`
 *
 * ## Protected (bearer token)
 * - `GET /api/auth/me`, `PUT /api/auth/update`, `GET /api/auth/all`
 * - `GET /api/users`
 * - `GET|POST /api/chats`, `DELETE /api/chats/{chat_id}`
 * - `POST /api/messages`, `GET /api/messages/{chat_id}`
 * - `GET /api/presence`
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{
    forgot_password, get_me, list_users, login, register, reset_password, update_profile,
};
use crate::backend::chat::{access_chat, delete_chat, fetch_chats};
use crate::backend::messaging::{get_messages, send_message};
use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::get_presence;
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password/{token}", post(reset_password));

    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/update", put(update_profile))
        .route("/api/auth/all", get(list_users))
        .route("/api/users", get(list_users))
        .route("/api/chats", get(fetch_chats).post(access_chat))
        .route("/api/chats/{chat_id}", delete(delete_chat))
        .route("/api/messages", post(send_message))
        .route("/api/messages/{chat_id}", get(get_messages))
        .route("/api/presence", get(get_presence))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router.merge(public).merge(protected)
}
