//! Fan-out Relay
//!
//! [`RelayHub`] owns every piece of relay state (connections, presence and
//! room membership) behind one `tokio::sync::Mutex`. Each operation takes
//! the lock, mutates synchronously, and queues frames with `try_send`, so
//! no await point ever happens while the lock is held and a slow receiver
//! cannot hold up anyone else.
//!
//! Events are serialized once per broadcast and the same `Arc<str>` frame is
//! handed to every receiver.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::connection::{ClientConnection, ConnectionId, ConnectionPhase, OutboundFrame, SendResult};
use super::presence::PresenceRegistry;
use super::rooms::RoomMembership;
use crate::shared::event::{ServerEvent, UserId};

/// Default per-connection outbound queue size
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Default)]
pub(super) struct RelayState {
    pub(super) connections: HashMap<ConnectionId, ClientConnection>,
    pub(super) presence: PresenceRegistry,
    pub(super) rooms: RoomMembership,
}

impl RelayState {
    /// Delivers `event` to every live connection.
    pub(super) fn broadcast_all(&mut self, event: &ServerEvent) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };
        let mut delivered = 0;
        for conn in self.connections.values_mut() {
            if conn.send(frame.clone()) == SendResult::Sent {
                delivered += 1;
            }
        }
        tracing::debug!("[Relay] {} delivered to {} connections", event.name(), delivered);
        delivered
    }

    /// Delivers `event` to the members of `room_id`, skipping `origin` when
    /// `exclude_self` is set.
    pub(super) fn broadcast_to_room(
        &mut self,
        room_id: &str,
        origin: ConnectionId,
        event: &ServerEvent,
        exclude_self: bool,
    ) -> usize {
        let Self { connections, rooms, .. } = self;

        let targets: Vec<ConnectionId> = rooms
            .members(room_id)
            .filter(|conn| !(exclude_self && *conn == origin))
            .collect();
        if targets.is_empty() {
            tracing::debug!("[Relay] No recipients in room {} for {}", room_id, event.name());
            return 0;
        }

        let Some(frame) = encode(event) else {
            return 0;
        };
        let mut delivered = 0;
        for target in targets {
            if let Some(conn) = connections.get_mut(&target) {
                if conn.send(frame.clone()) == SendResult::Sent {
                    delivered += 1;
                }
            }
        }
        tracing::debug!(
            "[Relay] {} delivered to {} connections in room {}",
            event.name(),
            delivered,
            room_id
        );
        delivered
    }
}

fn encode(event: &ServerEvent) -> Option<OutboundFrame> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Arc::from(json)),
        Err(e) => {
            tracing::error!("[Relay] Failed to serialize {}: {}", event.name(), e);
            None
        }
    }
}

/// Shared handle to the relay state. Cloning is cheap.
#[derive(Clone)]
pub struct RelayHub {
    state: Arc<Mutex<RelayState>>,
    queue_capacity: usize,
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl RelayHub {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(RelayState::default())),
            queue_capacity: queue_capacity.max(1),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub(super) async fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().await
    }

    /// Adds the connection to a room. Unknown connections are ignored.
    pub async fn join(&self, connection_id: ConnectionId, room_id: &str) -> bool {
        let mut state = self.lock().await;
        if !state.connections.contains_key(&connection_id) {
            tracing::debug!("[Relay] join-room from unknown connection {}", connection_id);
            return false;
        }
        let added = state.rooms.join(connection_id, room_id);
        if added {
            tracing::debug!("[Relay] Connection {} joined room {}", connection_id, room_id);
        }
        added
    }

    /// Removes the connection from a room. Leaving a room never joined is a no-op.
    pub async fn leave(&self, connection_id: ConnectionId, room_id: &str) -> bool {
        let removed = self.lock().await.rooms.leave(connection_id, room_id);
        if removed {
            tracing::debug!("[Relay] Connection {} left room {}", connection_id, room_id);
        }
        removed
    }

    /// Sends `event` to everyone in `room_id`, returning how many frames were queued.
    ///
    /// An empty or unknown room is not an error; the result is simply 0.
    pub async fn broadcast_to_room(
        &self,
        room_id: &str,
        origin: ConnectionId,
        event: ServerEvent,
        exclude_self: bool,
    ) -> usize {
        self.lock()
            .await
            .broadcast_to_room(room_id, origin, &event, exclude_self)
    }

    /// Sends `event` to every connection.
    pub async fn broadcast_all(&self, event: ServerEvent) -> usize {
        self.lock().await.broadcast_all(&event)
    }

    pub async fn online_users(&self) -> Vec<UserId> {
        self.lock().await.presence.online_users()
    }

    pub async fn is_online(&self, user_id: &str) -> bool {
        self.lock().await.presence.is_online(user_id)
    }

    pub async fn connection_of(&self, user_id: &str) -> Option<ConnectionId> {
        self.lock().await.presence.connection_of(user_id)
    }

    /// Sorted members of a room
    pub async fn room_members(&self, room_id: &str) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self.lock().await.rooms.members(room_id).collect();
        members.sort();
        members
    }

    pub async fn rooms_of(&self, connection_id: ConnectionId) -> Vec<String> {
        self.lock().await.rooms.rooms_of(connection_id)
    }

    pub async fn connection_count(&self) -> usize {
        self.lock().await.connections.len()
    }

    pub async fn phase(&self, connection_id: ConnectionId) -> ConnectionPhase {
        self.lock()
            .await
            .connections
            .get(&connection_id)
            .map(ClientConnection::phase)
            .unwrap_or(ConnectionPhase::Disconnected)
    }
}
