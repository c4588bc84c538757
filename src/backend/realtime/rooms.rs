//! Room membership index.
//!
//! Kept in both directions so a disconnect can purge a connection in time
//! proportional to its own room count instead of scanning every room.

use std::collections::{HashMap, HashSet};

use super::connection::ConnectionId;
use crate::shared::event::RoomId;

#[derive(Debug, Default)]
pub struct RoomMembership {
    members: HashMap<RoomId, HashSet<ConnectionId>>,
    joined: HashMap<ConnectionId, HashSet<RoomId>>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the connection was not already a member.
    pub fn join(&mut self, connection_id: ConnectionId, room_id: &str) -> bool {
        let added = self
            .members
            .entry(room_id.to_string())
            .or_default()
            .insert(connection_id);
        self.joined
            .entry(connection_id)
            .or_default()
            .insert(room_id.to_string());
        added
    }

    /// Returns `true` if the connection was a member. Empty rooms are dropped.
    pub fn leave(&mut self, connection_id: ConnectionId, room_id: &str) -> bool {
        let removed = match self.members.get_mut(room_id) {
            Some(conns) => {
                let removed = conns.remove(&connection_id);
                if conns.is_empty() {
                    self.members.remove(room_id);
                }
                removed
            }
            None => false,
        };

        if let Some(rooms) = self.joined.get_mut(&connection_id) {
            rooms.remove(room_id);
            if rooms.is_empty() {
                self.joined.remove(&connection_id);
            }
        }
        removed
    }

    /// Drops the connection from every room it joined, returning those rooms.
    pub fn purge_connection(&mut self, connection_id: ConnectionId) -> Vec<RoomId> {
        let rooms: Vec<RoomId> = self
            .joined
            .remove(&connection_id)
            .map(|rooms| rooms.into_iter().collect())
            .unwrap_or_default();

        for room in &rooms {
            if let Some(conns) = self.members.get_mut(room) {
                conns.remove(&connection_id);
                if conns.is_empty() {
                    self.members.remove(room);
                }
            }
        }
        rooms
    }

    /// Members of a room; an unknown room yields an empty iterator.
    pub fn members(&self, room_id: &str) -> impl Iterator<Item = ConnectionId> + '_ {
        self.members
            .get(room_id)
            .into_iter()
            .flat_map(|conns| conns.iter().copied())
    }

    pub fn is_member(&self, connection_id: ConnectionId, room_id: &str) -> bool {
        self.members
            .get(room_id)
            .is_some_and(|conns| conns.contains(&connection_id))
    }

    pub fn rooms_of(&self, connection_id: ConnectionId) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .joined
            .get(&connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    pub fn room_count(&self) -> usize {
        self.members.len()
    }
}
