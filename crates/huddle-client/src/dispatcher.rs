//! Inbound frame routing.
//!
//! The [`Dispatcher`] decodes each inbound text frame, hands membership
//! acknowledgements to the [`RoomSession`], and appends a human-readable line
//! to the [`MessageLog`] for every discriminant that has one.
//!
//! | discriminant | room session | log line |
//! |---|---|---|
//! | `send_message` | | `<username>: <message>` |
//! | `user_connected` | | `User connected: <username>` |
//! | `user_disconnected` | | `User disconnected: <username>` |
//! | `room_left` | | `<username> has left the room` |
//! | `room_created` | `on_room_created` | `Room created successfully! Room Code: <code>` |
//! | `room_joined` | `on_room_joined` | `<username> has joined the room <room_name>` |
//!
//! Everything else (outbound-only discriminants echoed back, discriminants
//! from a newer protocol version) is ignored without error.

use huddle_proto::{Event, EventKind, ProtocolError};

use crate::{MessageLog, RoomSession};

/// Outcome of dispatching one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Frame was handled and one line was appended to the log.
    Logged(EventKind),
    /// Known discriminant that clients do not act on.
    Ignored(EventKind),
    /// Discriminant unknown to this protocol version.
    Unknown,
}

/// Running counters for dispatched frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Frames that produced a log line.
    pub logged: u64,
    /// Frames skipped (known but not routed, or unknown discriminant).
    pub ignored: u64,
    /// Frames dropped because they failed to decode.
    pub dropped: u64,
}

/// Decodes and routes inbound frames.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    stats: DispatcherStats,
}

impl Dispatcher {
    /// Create a dispatcher with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters since creation.
    pub fn stats(&self) -> DispatcherStats {
        self.stats
    }

    /// Decode `frame` and route it.
    ///
    /// # Errors
    ///
    /// Returns the decode error for a frame that is not valid JSON, is
    /// oversized, or has a malformed payload for a known discriminant. The
    /// frame is dropped: neither `session` nor `log` is touched.
    pub fn dispatch(
        &mut self,
        frame: &str,
        session: &mut RoomSession,
        log: &mut MessageLog,
    ) -> Result<Routed, ProtocolError> {
        let event = match Event::decode(frame) {
            Ok(Some(event)) => event,
            Ok(None) => {
                tracing::debug!("ignoring frame with unknown discriminant");
                self.stats.ignored += 1;
                return Ok(Routed::Unknown);
            },
            Err(e) => {
                tracing::warn!(error = %e, "dropping inbound frame");
                self.stats.dropped += 1;
                return Err(e);
            },
        };

        Ok(self.route(&event, session, log))
    }

    /// Route an already-decoded event.
    pub fn route(
        &mut self,
        event: &Event,
        session: &mut RoomSession,
        log: &mut MessageLog,
    ) -> Routed {
        let kind = event.kind();
        if !kind.is_inbound() {
            tracing::debug!(%kind, "ignoring outbound-only frame from server");
            self.stats.ignored += 1;
            return Routed::Ignored(kind);
        }

        match event {
            Event::RoomCreated(ack) => session.on_room_created(ack),
            Event::RoomJoined(notice) => session.on_room_joined(notice),
            _ => {},
        }

        if let Some(line) = render_line(event) {
            log.push(line);
            self.stats.logged += 1;
            Routed::Logged(kind)
        } else {
            tracing::debug!(%kind, "ignoring frame");
            self.stats.ignored += 1;
            Routed::Ignored(kind)
        }
    }
}

/// Human-readable projection of an inbound event.
///
/// `None` for discriminants that never produce a log line.
pub fn render_line(event: &Event) -> Option<String> {
    match event {
        Event::SendMessage(chat) => Some(format!("{}: {}", chat.username, chat.message)),
        Event::UserConnected(p) => Some(format!("User connected: {}", p.username)),
        Event::UserDisconnected(p) => Some(format!("User disconnected: {}", p.username)),
        Event::RoomLeft(p) => Some(format!("{} has left the room", p.username)),
        Event::RoomCreated(ack) => {
            Some(format!("Room created successfully! Room Code: {}", ack.room_code))
        },
        Event::RoomJoined(notice) => {
            Some(format!("{} has joined the room {}", notice.username, notice.room_name))
        },
        Event::CreateRoom(_) | Event::JoinRoom(_) | Event::LeaveRoom(_) => None,
    }
}
