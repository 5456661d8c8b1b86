//! Tagged events and their discriminants.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    errors::{ProtocolError, Result},
    payloads::{ChatMessage, CreateRoom, JoinRoom, LeaveRoom, RoomCreated, RoomJoined, UserPresence},
};

/// Largest frame accepted by [`Event::decode`], in bytes.
///
/// Checked before JSON parsing starts so an oversized frame costs a length
/// comparison and nothing else.
pub const MAX_FRAME_SIZE: usize = 1 << 20;

/// Which side of the connection originates a discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Client to server only.
    Outbound,
    /// Server to client only.
    Inbound,
    /// Sent by clients and relayed by the server.
    Both,
}

/// Payload-free discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `send_message`
    SendMessage,
    /// `user_connected`
    UserConnected,
    /// `user_disconnected`
    UserDisconnected,
    /// `create_room`
    CreateRoom,
    /// `join_room`
    JoinRoom,
    /// `leave_room`
    LeaveRoom,
    /// `room_left`
    RoomLeft,
    /// `room_created`
    RoomCreated,
    /// `room_joined`
    RoomJoined,
}

impl EventKind {
    /// Every discriminant the protocol defines.
    pub const ALL: [Self; 9] = [
        Self::SendMessage,
        Self::UserConnected,
        Self::UserDisconnected,
        Self::CreateRoom,
        Self::JoinRoom,
        Self::LeaveRoom,
        Self::RoomLeft,
        Self::RoomCreated,
        Self::RoomJoined,
    ];

    /// Wire name carried in the `type` field.
    #[must_use]
    pub const fn discriminant(self) -> &'static str {
        match self {
            Self::SendMessage => "send_message",
            Self::UserConnected => "user_connected",
            Self::UserDisconnected => "user_disconnected",
            Self::CreateRoom => "create_room",
            Self::JoinRoom => "join_room",
            Self::LeaveRoom => "leave_room",
            Self::RoomLeft => "room_left",
            Self::RoomCreated => "room_created",
            Self::RoomJoined => "room_joined",
        }
    }

    /// Look up a wire name. `None` for discriminants this version does not
    /// know.
    #[must_use]
    pub fn from_discriminant(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.discriminant() == name)
    }

    /// Which side originates this discriminant.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::SendMessage => Direction::Both,
            Self::CreateRoom | Self::JoinRoom | Self::LeaveRoom => Direction::Outbound,
            Self::UserConnected
            | Self::UserDisconnected
            | Self::RoomLeft
            | Self::RoomCreated
            | Self::RoomJoined => Direction::Inbound,
        }
    }

    /// Whether a client should expect to receive this discriminant.
    #[must_use]
    pub const fn is_inbound(self) -> bool {
        matches!(self.direction(), Direction::Inbound | Direction::Both)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminant())
    }
}

/// A protocol message: discriminant plus its payload.
///
/// Serializes with adjacent tagging, so `Event::CreateRoom(..)` becomes
/// `{"type":"create_room","payload":{..}}`.
///
/// # Invariants
///
/// Each variant maps to exactly one [`EventKind`] and the serde name of the
/// variant equals [`EventKind::discriminant`]. Adding a variant breaks the
/// exhaustive matches in [`Event::kind`] and [`Event::decode`] until both are
/// updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Event {
    /// Chat line.
    SendMessage(ChatMessage),
    /// A peer connected to the server.
    UserConnected(UserPresence),
    /// A peer disconnected from the server.
    UserDisconnected(UserPresence),
    /// Create a room.
    CreateRoom(CreateRoom),
    /// Join a room by code.
    JoinRoom(JoinRoom),
    /// Leave the current room.
    LeaveRoom(LeaveRoom),
    /// A peer left the room we are in.
    RoomLeft(UserPresence),
    /// Our room was created.
    RoomCreated(RoomCreated),
    /// Someone (possibly us) joined the room.
    RoomJoined(RoomJoined),
}

impl Event {
    /// Build a `create_room` request.
    pub fn create_room(room_name: impl Into<String>) -> Self {
        Self::CreateRoom(CreateRoom { room_name: room_name.into() })
    }

    /// Build a `join_room` request.
    pub fn join_room(room_code: impl Into<String>, username: impl Into<String>) -> Self {
        Self::JoinRoom(JoinRoom { room_code: room_code.into(), username: username.into() })
    }

    /// Build a `leave_room` request.
    pub fn leave_room() -> Self {
        Self::LeaveRoom(LeaveRoom {})
    }

    /// Build a `send_message` chat line.
    pub fn chat(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SendMessage(ChatMessage { username: username.into(), message: message.into() })
    }

    /// Discriminant of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SendMessage(_) => EventKind::SendMessage,
            Self::UserConnected(_) => EventKind::UserConnected,
            Self::UserDisconnected(_) => EventKind::UserDisconnected,
            Self::CreateRoom(_) => EventKind::CreateRoom,
            Self::JoinRoom(_) => EventKind::JoinRoom,
            Self::LeaveRoom(_) => EventKind::LeaveRoom,
            Self::RoomLeft(_) => EventKind::RoomLeft,
            Self::RoomCreated(_) => EventKind::RoomCreated,
            Self::RoomJoined(_) => EventKind::RoomJoined,
        }
    }

    /// Encode to a JSON text frame.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Encode` if serialization fails
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ProtocolError::Encode { kind: self.kind(), reason: e.to_string() })
    }

    /// Decode a JSON text frame.
    ///
    /// Returns `Ok(None)` for a well-formed frame whose discriminant this
    /// version does not know. Such frames are expected from newer peers and
    /// must be skipped, not reported.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooLarge` if `text` exceeds [`MAX_FRAME_SIZE`]
    /// - `ProtocolError::InvalidFrame` if `text` is not a JSON object with a
    ///   string `type` field
    /// - `ProtocolError::MalformedPayload` if the payload is missing a field or
    ///   has a field of the wrong type
    pub fn decode(text: &str) -> Result<Option<Self>> {
        if text.len() > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge { size: text.len(), max: MAX_FRAME_SIZE });
        }

        let value: Value =
            serde_json::from_str(text).map_err(|e| ProtocolError::InvalidFrame(e.to_string()))?;
        let Value::Object(mut object) = value else {
            return Err(ProtocolError::InvalidFrame("frame is not a JSON object".to_string()));
        };

        let kind = match object.get("type") {
            Some(Value::String(name)) => EventKind::from_discriminant(name),
            _ => return Err(ProtocolError::InvalidFrame("missing string `type` field".to_string())),
        };
        let Some(kind) = kind else {
            return Ok(None);
        };

        let payload = object.remove("payload").unwrap_or(Value::Null);

        let event = match kind {
            EventKind::SendMessage => Self::SendMessage(decode_payload(kind, payload)?),
            EventKind::UserConnected => Self::UserConnected(decode_payload(kind, payload)?),
            EventKind::UserDisconnected => Self::UserDisconnected(decode_payload(kind, payload)?),
            EventKind::CreateRoom => Self::CreateRoom(decode_payload(kind, payload)?),
            EventKind::JoinRoom => Self::JoinRoom(decode_payload(kind, payload)?),
            EventKind::LeaveRoom => Self::LeaveRoom(decode_payload(kind, payload)?),
            EventKind::RoomLeft => Self::RoomLeft(decode_payload(kind, payload)?),
            EventKind::RoomCreated => Self::RoomCreated(decode_payload(kind, payload)?),
            EventKind::RoomJoined => Self::RoomJoined(decode_payload(kind, payload)?),
        };

        Ok(Some(event))
    }
}

fn decode_payload<T: DeserializeOwned>(kind: EventKind, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| ProtocolError::MalformedPayload { kind, reason: e.to_string() })
}
