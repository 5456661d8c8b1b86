//! Client events and actions.

use crate::ConnectionState;

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Opening and closing the socket, and reporting what happened
/// - Receiving text frames from the network
/// - Forwarding application intents (create room, send message, etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Application wants to connect to a server.
    Connect {
        /// WebSocket URL.
        url: String,
    },

    /// The socket opened.
    Opened,

    /// The socket closed.
    Closed,

    /// Opening the socket failed, or the socket errored out.
    TransportFailed {
        /// Human-readable cause.
        reason: String,
    },

    /// Text frame received from the server.
    FrameReceived(String),

    /// Application wants to create a new room.
    CreateRoom {
        /// Room name.
        name: String,
    },

    /// Application wants to join an existing room.
    JoinRoom {
        /// Room code to join.
        code: String,
        /// Display name to join as.
        username: String,
    },

    /// Application wants to leave the current room.
    LeaveRoom,

    /// Application wants to send a chat message.
    SendMessage {
        /// Sender display name.
        username: String,
        /// Message text.
        message: String,
    },
}

/// Actions the client produces for the caller to execute.
///
/// Within one batch, actions are ordered: `Open`, then `Send`, then the
/// state-change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Open a connection to `url`, then report `Opened` or `TransportFailed`.
    Open {
        /// WebSocket URL.
        url: String,
    },

    /// Write a text frame to the server.
    Send(String),

    /// Connection state changed.
    ConnectionChanged(ConnectionState),

    /// Room code or name changed.
    RoomChanged {
        /// Current room code. Empty if not in a room.
        room_code: String,
        /// Current room name. Empty if unknown.
        room_name: String,
    },

    /// An error was recorded. Repeats of the same message are reported again.
    Error {
        /// Error text.
        message: String,
    },

    /// Last error went back to empty, e.g. after the socket reopened.
    ErrorCleared,

    /// One line was appended to the message log.
    LogAppended(String),
}
