//! Routes decoded client events to hub operations.

use super::connection::ConnectionId;
use super::relay::RelayHub;
use crate::backend::error::RelayError;
use crate::shared::event::{
    ClientEvent, RoomId, SeenNotice, ServerEvent, StoppedTypingNotice, TypingNotice,
};

fn require_id(field: &str, value: Option<String>) -> Result<String, RelayError> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(RelayError::MalformedEvent(format!("{} is required", field))),
    }
}

fn require_room(room_id: Option<RoomId>) -> Result<RoomId, RelayError> {
    require_id("roomId", room_id)
}

impl RelayHub {
    /// Applies one inbound event from `origin`.
    ///
    /// Messages go to the whole room including the sender; typing and seen
    /// notices skip the sender. Errors mean the event was dropped.
    pub async fn dispatch(&self, origin: ConnectionId, event: ClientEvent) -> Result<(), RelayError> {
        tracing::debug!("[Relay] {} from connection {}", event.name(), origin);

        match event {
            ClientEvent::Identify(user_id) => {
                let user_id = require_id("userId", Some(user_id))?;
                self.identify(origin, user_id).await
            }
            ClientEvent::JoinRoom(room_id) => {
                let room_id = require_room(Some(room_id))?;
                self.join(origin, &room_id).await;
                Ok(())
            }
            ClientEvent::LeaveRoom(room_id) => {
                let room_id = require_room(Some(room_id))?;
                self.leave(origin, &room_id).await;
                Ok(())
            }
            ClientEvent::RelayMessage(relay) => {
                let room_id = require_room(relay.room_id)?;
                let message = relay
                    .message
                    .ok_or_else(|| RelayError::MalformedEvent("message is required".into()))?;
                let event = ServerEvent::message_received(&room_id, message)?;
                self.broadcast_to_room(&room_id, origin, event, false).await;
                Ok(())
            }
            ClientEvent::TypingStart(typing) => {
                let room_id = require_room(typing.room_id)?;
                let event = ServerEvent::UserTyping(TypingNotice {
                    user_id: typing.user_id,
                    username: typing.username,
                });
                self.broadcast_to_room(&room_id, origin, event, true).await;
                Ok(())
            }
            ClientEvent::TypingStop(typing) => {
                let room_id = require_room(typing.room_id)?;
                let event = ServerEvent::UserStoppedTyping(StoppedTypingNotice {
                    user_id: typing.user_id,
                });
                self.broadcast_to_room(&room_id, origin, event, true).await;
                Ok(())
            }
            ClientEvent::Seen(seen) => {
                let room_id = require_room(seen.room_id)?;
                let event = ServerEvent::MessageSeen(SeenNotice {
                    message_id: seen.message_id,
                    user_id: seen.user_id,
                });
                self.broadcast_to_room(&room_id, origin, event, true).await;
                Ok(())
            }
        }
    }

    /// Decodes a text frame and dispatches it
    pub async fn handle_frame(&self, origin: ConnectionId, frame: &str) -> Result<(), RelayError> {
        let event = ClientEvent::from_frame(frame)?;
        self.dispatch(origin, event).await
    }
}
