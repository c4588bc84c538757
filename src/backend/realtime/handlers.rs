//! HTTP entry points of the relay: the socket upgrade and the presence snapshot.

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocketUpgrade},
        Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use super::relay::RelayHub;
use super::socket::{authenticate_socket, run_connection, verify_socket_account};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::event::UserId;

#[derive(Debug, Default, Deserialize)]
pub struct SocketParams {
    pub token: Option<String>,
}

/// `GET /ws`
///
/// Authentication is checked before the upgrade so a refused socket gets a
/// plain 401. With a database, the token's user must still exist.
pub async fn handle_socket_upgrade(
    State(app_state): State<AppState>,
    Query(params): Query<SocketParams>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let authorization = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());

    let auth_required = app_state.config.socket_auth_required;
    let authenticated = match authenticate_socket(
        &app_state.jwt,
        auth_required,
        authorization,
        params.token.as_deref(),
    ) {
        Ok(user) => verify_socket_account(app_state.db_pool.as_ref(), user, auth_required).await,
        Err(e) => Err(e),
    };

    let authenticated_user = match authenticated {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("[Relay] Socket upgrade refused: {}", e);
            return BackendError::unauthorized("Unauthorized: Invalid token").into_response();
        }
    };

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let hub = app_state.relay.clone();
    ws.on_upgrade(move |socket| run_connection(socket, hub, authenticated_user))
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresenceResponse {
    pub online: Vec<UserId>,
}

/// `GET /api/presence`
pub async fn get_presence(State(hub): State<RelayHub>) -> Json<PresenceResponse> {
    Json(PresenceResponse {
        online: hub.online_users().await,
    })
}
