//! Room membership state machine.
//!
//! [`RoomSession`] holds the client's belief about which room it is in. Room
//! commands are acknowledged asynchronously, but there is no pending state:
//! each command writes the field its caller already knows immediately, and the
//! acknowledgement fills in the field the server assigns.
//!
//! | command | optimistic write | filled by |
//! |---|---|---|
//! | `create_room(name)` | `room_name` | `room_created` → `room_code` |
//! | `join_room(code, ..)` | `room_code` | `room_joined` → `room_name` |
//! | `leave_room()` | clears both | no acknowledgement |
//!
//! The protocol has no rejection message, so a refused command looks exactly
//! like one still in flight. Acknowledgements carry no correlation id either:
//! a stale `room_created` for an earlier request is indistinguishable from the
//! current one.

use huddle_proto::{
    Event,
    payloads::{RoomCreated, RoomJoined},
};

use crate::{ClientError, Transport};

/// Local view of the current room.
///
/// # Invariants
///
/// - `room_code` is non-empty iff the client believes it is a member of a room.
/// - `room_name` may be set while `room_code` is still empty (create in
///   flight) and may lag behind `room_code` (join in flight).
/// - At most one room at a time. Creating or joining while in a room simply
///   overwrites the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSession {
    room_code: String,
    room_name: String,
}

impl RoomSession {
    /// Create a session with no room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current room code. Empty if not in a room.
    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    /// Current room name. Empty if unknown or not in a room.
    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// Whether a room code is held.
    pub fn is_in_room(&self) -> bool {
        !self.room_code.is_empty()
    }

    /// Request a new room named `name`.
    ///
    /// Sets `room_name` right away; `room_code` stays as it was until the
    /// `room_created` acknowledgement arrives. The local write happens even if
    /// the send fails because the transport is down.
    pub fn create_room(&mut self, transport: &mut Transport, name: impl Into<String>) {
        let name = name.into();
        transport.send(&Event::create_room(name.clone()));
        self.room_name = name;
    }

    /// Request to join the room `code` as `username`.
    ///
    /// Sets `room_code` right away; `room_name` stays as it was until a
    /// `room_joined` notice arrives.
    pub fn join_room(
        &mut self,
        transport: &mut Transport,
        code: impl Into<String>,
        username: impl Into<String>,
    ) {
        let code = code.into();
        transport.send(&Event::join_room(code.clone(), username));
        self.room_code = code;
    }

    /// Leave the current room.
    ///
    /// Sends `leave_room` and clears both fields without waiting for any
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotInRoom` if no room code is held. Nothing is sent and
    ///   nothing changes.
    pub fn leave_room(&mut self, transport: &mut Transport) -> Result<(), ClientError> {
        if !self.is_in_room() {
            return Err(ClientError::NotInRoom);
        }

        transport.send(&Event::leave_room());
        self.room_code.clear();
        self.room_name.clear();
        Ok(())
    }

    /// Apply a `room_created` acknowledgement.
    ///
    /// Only the code is taken; the name was already written by
    /// [`RoomSession::create_room`].
    pub fn on_room_created(&mut self, ack: &RoomCreated) {
        self.room_code.clone_from(&ack.room_code);
    }

    /// Apply a `room_joined` notice.
    ///
    /// Only the name is taken; the code was already written by
    /// [`RoomSession::join_room`].
    pub fn on_room_joined(&mut self, notice: &RoomJoined) {
        self.room_name.clone_from(&notice.room_name);
    }
}
