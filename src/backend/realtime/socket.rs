//! WebSocket transport for one connection.
//!
//! The socket is split in two. A writer task drains the connection's
//! outbound queue into the sink; the reader loop decodes text frames and
//! dispatches them to the hub. When the reader ends, for any reason, the
//! connection is disconnected from the hub, which drops the queue and lets
//! the writer finish.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use super::relay::RelayHub;
use crate::backend::auth::sessions::{bearer_token, JwtKeys};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::RelayError;
use crate::shared::event::UserId;

/// Resolves the user a socket upgrade is authenticated as.
///
/// The token comes from `Authorization: Bearer` or, for browsers that cannot
/// set headers on a WebSocket, from `?token=`. An invalid or missing token
/// yields an anonymous connection unless `auth_required` is set.
pub fn authenticate_socket(
    jwt: &JwtKeys,
    auth_required: bool,
    authorization: Option<&str>,
    query_token: Option<&str>,
) -> Result<Option<UserId>, RelayError> {
    let token = authorization
        .and_then(bearer_token)
        .or_else(|| query_token.filter(|t| !t.is_empty()));

    let Some(token) = token else {
        if auth_required {
            return Err(RelayError::Unauthenticated("no token provided".into()));
        }
        return Ok(None);
    };

    match jwt.user_id_from_token(token) {
        Ok(user_id) => Ok(Some(user_id.to_string())),
        Err(e) if auth_required => Err(RelayError::Unauthenticated(e.to_string())),
        Err(e) => {
            tracing::warn!("[Relay] Ignoring invalid socket token: {}", e);
            Ok(None)
        }
    }
}

/// Treats a token whose account is gone like an invalid token.
pub fn confirm_account(
    user_id: UserId,
    account_exists: bool,
    auth_required: bool,
) -> Result<Option<UserId>, RelayError> {
    if account_exists {
        return Ok(Some(user_id));
    }
    if auth_required {
        return Err(RelayError::Unauthenticated(format!("user {} not found", user_id)));
    }
    tracing::warn!("[Relay] Ignoring socket token for unknown user {}", user_id);
    Ok(None)
}

/// Looks the token's user up when a database is configured.
///
/// A failed lookup counts as a missing account.
pub async fn verify_socket_account(
    pool: Option<&PgPool>,
    user: Option<UserId>,
    auth_required: bool,
) -> Result<Option<UserId>, RelayError> {
    let Some(pool) = pool else {
        return Ok(user);
    };
    let Some(user_id) = user else {
        return Ok(None);
    };

    let account_exists = match Uuid::parse_str(&user_id) {
        Ok(id) => match get_user_by_id(pool, id).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::error!("[Relay] User lookup for socket failed: {}", e);
                false
            }
        },
        Err(_) => false,
    };
    confirm_account(user_id, account_exists, auth_required)
}

pub async fn run_connection(socket: WebSocket, hub: RelayHub, authenticated_user: Option<UserId>) {
    let (connection_id, mut outbound) = hub.connect(authenticated_user).await;
    let (mut sink, mut stream) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if let Err(e) = sink.send(Message::Text(frame.to_string().into())).await {
                tracing::debug!("[Relay] Write to connection {} failed: {}", connection_id, e);
                break;
            }
        }
        let _ = sink.close().await;
    });

    loop {
        tokio::select! {
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = hub.handle_frame(connection_id, text.as_str()).await {
                            tracing::warn!("[Relay] Dropped event from connection {}: {}", connection_id, e);
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::warn!("[Relay] Binary frame from connection {} ignored", connection_id);
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!("[Relay] Read from connection {} failed: {}", connection_id, e);
                        break;
                    }
                }
            }
            _ = &mut writer => {
                tracing::debug!("[Relay] Writer for connection {} stopped", connection_id);
                break;
            }
        }
    }

    hub.disconnect(connection_id).await;
    writer.abort();
}
