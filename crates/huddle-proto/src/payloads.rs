//! Payload shapes, one per discriminant family.
//!
//! Several discriminants share a shape: presence notices (`user_connected`,
//! `user_disconnected`, `room_left`) all carry a bare [`UserPresence`].
//!
//! Deserialization is strict about required fields and lenient about extra
//! ones. A missing `username` is a malformed frame; an unexpected `avatar`
//! field is silently ignored.

use serde::{Deserialize, Serialize};

/// Chat line (`send_message`), sent by clients and relayed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the author.
    pub username: String,
    /// Message text.
    pub message: String,
}

/// Presence notice naming a single peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPresence {
    /// Display name of the peer.
    pub username: String,
}

/// Request to create a room (`create_room`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Human-readable room name chosen by the creator.
    pub room_name: String,
}

/// Request to join an existing room (`join_room`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoom {
    /// Code of the room to join.
    pub room_code: String,
    /// Display name to join under.
    pub username: String,
}

/// Request to leave the current room (`leave_room`).
///
/// Carries no fields but still encodes as `{}`, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRoom {}

/// Acknowledgement that a room was created (`room_created`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCreated {
    /// Server-assigned room code.
    pub room_code: String,
    /// Room name as recorded by the server.
    pub room_name: String,
}

/// Notice that a user joined a room (`room_joined`).
///
/// Sent both as the acknowledgement of our own join and when a peer joins the
/// room we are in. The protocol carries no field that tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomJoined {
    /// Display name of the user who joined.
    pub username: String,
    /// Name of the room that was joined.
    pub room_name: String,
}
