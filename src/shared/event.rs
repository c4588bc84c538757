//! Socket Event Vocabulary
//!
//! Every WebSocket frame is a JSON text frame of the form
//! `{"event": "<name>", "data": <payload>}`. [`ClientEvent`] covers what a
//! client may send, [`ServerEvent`] what the relay pushes back out.
//!
//! Payload keys are camelCase so browser clients can use them directly.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::SharedError;

pub type UserId = String;
pub type RoomId = String;

/// Events accepted from a client connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Bind the connection to a user and mark that user online
    Identify(UserId),
    JoinRoom(RoomId),
    LeaveRoom(RoomId),
    /// Relay an already-persisted message to everyone in the room
    RelayMessage(RelayMessage),
    TypingStart(TypingStart),
    TypingStop(TypingStop),
    Seen(SeenReceipt),
}

impl ClientEvent {
    /// Decode one inbound text frame
    pub fn from_frame(frame: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(frame)?)
    }

    /// Wire name of the event, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identify(_) => "identify",
            Self::JoinRoom(_) => "join-room",
            Self::LeaveRoom(_) => "leave-room",
            Self::RelayMessage(_) => "relay-message",
            Self::TypingStart(_) => "typing-start",
            Self::TypingStop(_) => "typing-stop",
            Self::Seen(_) => "seen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayMessage {
    pub room_id: Option<RoomId>,
    pub message: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStart {
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStop {
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenReceipt {
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Events pushed to client connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    PresenceChanged(PresenceChange),
    /// The relayed message object with `roomId` merged in
    MessageReceived(Map<String, Value>),
    UserTyping(TypingNotice),
    UserStoppedTyping(StoppedTypingNotice),
    MessageSeen(SeenNotice),
}

impl ServerEvent {
    pub fn online(user_id: impl Into<UserId>) -> Self {
        Self::PresenceChanged(PresenceChange {
            user_id: user_id.into(),
            status: PresenceStatus::Online,
        })
    }

    pub fn offline(user_id: impl Into<UserId>) -> Self {
        Self::PresenceChanged(PresenceChange {
            user_id: user_id.into(),
            status: PresenceStatus::Offline,
        })
    }

    /// Builds `message-received` from a client-supplied message body.
    ///
    /// The body must be a JSON object. `roomId` is written into it, replacing
    /// any value the client put there.
    pub fn message_received(room_id: &str, message: Value) -> Result<Self, SharedError> {
        match message {
            Value::Object(mut body) => {
                body.insert("roomId".to_string(), Value::String(room_id.to_string()));
                Ok(Self::MessageReceived(body))
            }
            _ => Err(SharedError::validation(
                "message",
                "message must be a JSON object",
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PresenceChanged(_) => "presence-changed",
            Self::MessageReceived(_) => "message-received",
            Self::UserTyping(_) => "user-typing",
            Self::UserStoppedTyping(_) => "user-stopped-typing",
            Self::MessageSeen(_) => "message-seen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceChange {
    pub user_id: UserId,
    pub status: PresenceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingNotice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppedTypingNotice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenNotice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}
