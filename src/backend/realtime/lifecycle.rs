//! Connection lifecycle: `Connected -> (identify) -> Online -> Disconnected`.

use tokio::sync::mpsc;

use super::connection::{ClientConnection, ConnectionId, OutboundFrame};
use super::relay::RelayHub;
use crate::backend::error::RelayError;
use crate::shared::event::{ServerEvent, UserId};

impl RelayHub {
    /// Registers a new connection and hands back the receiving end of its
    /// outbound queue for the writer task.
    pub async fn connect(
        &self,
        authenticated_user: Option<UserId>,
    ) -> (ConnectionId, mpsc::Receiver<OutboundFrame>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity());
        let id = ConnectionId::new();
        let conn = ClientConnection::new(id, tx, authenticated_user.clone());

        let mut state = self.lock().await;
        state.connections.insert(id, conn);
        tracing::info!(
            "[Relay] Connection {} opened (authenticated as {:?}, {} connected)",
            id,
            authenticated_user,
            state.connections.len()
        );
        (id, rx)
    }

    /// Marks `user_id` online on this connection and tells every connection.
    ///
    /// A later identify for the same user from another connection takes over
    /// the presence entry. Re-identifying this connection as a different user
    /// releases the old user with an offline notice if the entry still
    /// points here. Unknown connections are ignored.
    pub async fn identify(
        &self,
        connection_id: ConnectionId,
        user_id: UserId,
    ) -> Result<(), RelayError> {
        let mut guard = self.lock().await;
        let state = &mut *guard;

        let Some(conn) = state.connections.get_mut(&connection_id) else {
            tracing::debug!("[Relay] identify from unknown connection {}", connection_id);
            return Ok(());
        };

        if let Some(authenticated) = conn.authenticated_user() {
            if authenticated != user_id {
                return Err(RelayError::IdentityMismatch {
                    authenticated: authenticated.to_string(),
                    claimed: user_id,
                });
            }
        }

        let previous_user = conn.set_identified_user(user_id.clone());

        if let Some(previous_user) = previous_user.filter(|prev| *prev != user_id) {
            if state.presence.release(&previous_user, connection_id) {
                tracing::info!(
                    "[Relay] Connection {} switched from {} to {}",
                    connection_id,
                    previous_user,
                    user_id
                );
                state.broadcast_all(&ServerEvent::offline(previous_user));
            }
        }

        if let Some(replaced) = state.presence.set_online(user_id.clone(), connection_id) {
            if replaced != connection_id {
                tracing::info!(
                    "[Relay] User {} moved from connection {} to {}",
                    user_id,
                    replaced,
                    connection_id
                );
            }
        }

        tracing::info!("[Relay] User {} online on connection {}", user_id, connection_id);
        state.broadcast_all(&ServerEvent::online(user_id));
        Ok(())
    }

    /// Tears a connection down: leaves every room, clears its presence entry
    /// and drops its outbound queue. Returns the user that went offline, if
    /// the connection still owned a presence entry.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> Option<UserId> {
        let mut state = self.lock().await;

        let conn = state.connections.remove(&connection_id)?;
        let rooms = state.rooms.purge_connection(connection_id);
        let went_offline = state.presence.remove_by_connection(connection_id);

        if let Some(user_id) = &went_offline {
            state.broadcast_all(&ServerEvent::offline(user_id.clone()));
        }

        tracing::info!(
            "[Relay] Connection {} closed (user {:?}, left {} rooms, {} frames dropped, {} connected)",
            connection_id,
            conn.identified_user(),
            rooms.len(),
            conn.dropped_frames(),
            state.connections.len()
        );
        went_offline
    }
}
