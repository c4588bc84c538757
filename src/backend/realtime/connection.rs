//! Per-connection state held by the relay hub.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::shared::event::UserId;

/// A pre-serialized outbound frame, shared across every receiver of a broadcast
pub type OutboundFrame = Arc<str>;

/// Opaque id for one WebSocket session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a connection sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Upgraded but not yet identified
    Connected,
    /// Identified as a user
    Online,
    /// Closed; no longer known to the hub
    Disconnected,
}

/// Outcome of a single non-blocking delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendResult {
    Sent,
    QueueFull,
    Closed,
}

/// A connected client as seen by the hub.
pub struct ClientConnection {
    pub id: ConnectionId,
    /// Send side of the client's writer task queue
    tx: mpsc::Sender<OutboundFrame>,
    /// User proven by a bearer token at upgrade time, if any
    authenticated_user: Option<UserId>,
    /// User claimed by the last accepted `identify`
    identified_user: Option<UserId>,
    dropped_frames: u64,
}

impl ClientConnection {
    pub fn new(
        id: ConnectionId,
        tx: mpsc::Sender<OutboundFrame>,
        authenticated_user: Option<UserId>,
    ) -> Self {
        Self {
            id,
            tx,
            authenticated_user,
            identified_user: None,
            dropped_frames: 0,
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        if self.identified_user.is_some() {
            ConnectionPhase::Online
        } else {
            ConnectionPhase::Connected
        }
    }

    pub fn authenticated_user(&self) -> Option<&str> {
        self.authenticated_user.as_deref()
    }

    pub fn identified_user(&self) -> Option<&str> {
        self.identified_user.as_deref()
    }

    /// Records the identified user, returning the one it replaces
    pub fn set_identified_user(&mut self, user_id: UserId) -> Option<UserId> {
        self.identified_user.replace(user_id)
    }

    /// Queues a frame without waiting. Full or closed queues drop the frame.
    pub fn send(&mut self, frame: OutboundFrame) -> SendResult {
        match self.tx.try_send(frame) {
            Ok(()) => SendResult::Sent,
            Err(TrySendError::Full(_)) => {
                self.dropped_frames += 1;
                tracing::warn!(
                    "[Relay] Outbound queue full for connection {}, dropping frame ({} dropped so far)",
                    self.id,
                    self.dropped_frames
                );
                SendResult::QueueFull
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("[Relay] Outbound queue closed for connection {}", self.id);
                SendResult::Closed
            }
        }
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }
}
