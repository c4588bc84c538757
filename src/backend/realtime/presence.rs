//! Presence Registry
//!
//! In-memory map from user id to the one connection currently speaking for
//! that user. The last connection to identify wins. Nothing is persisted,
//! so the registry is empty after a restart.

use std::collections::HashMap;

use super::connection::ConnectionId;
use crate::shared::event::UserId;

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    online: HashMap<UserId, ConnectionId>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `user_id` to `connection_id`, returning the connection it replaced.
    pub fn set_online(&mut self, user_id: UserId, connection_id: ConnectionId) -> Option<ConnectionId> {
        self.online.insert(user_id, connection_id)
    }

    /// Removes the entry mapped to `connection_id`, if any, and returns its user.
    ///
    /// A connection that was superseded by a newer one for the same user no
    /// longer owns an entry, so this returns `None` for it.
    pub fn remove_by_connection(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        let user_id = self
            .online
            .iter()
            .find(|(_, conn)| **conn == connection_id)
            .map(|(user, _)| user.clone())?;
        self.online.remove(&user_id);
        Some(user_id)
    }

    /// Removes `user_id` only while it still maps to `connection_id`.
    pub fn release(&mut self, user_id: &str, connection_id: ConnectionId) -> bool {
        if self.online.get(user_id) == Some(&connection_id) {
            self.online.remove(user_id);
            true
        } else {
            false
        }
    }

    pub fn connection_of(&self, user_id: &str) -> Option<ConnectionId> {
        self.online.get(user_id).copied()
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.online.contains_key(user_id)
    }

    /// Sorted snapshot of online user ids
    pub fn online_users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.online.keys().cloned().collect();
        users.sort();
        users
    }

    pub fn len(&self) -> usize {
        self.online.len()
    }

    pub fn is_empty(&self) -> bool {
        self.online.is_empty()
    }
}
