//! Client state machine.
//!
//! The `Client` ties the [`Transport`], [`Dispatcher`], [`RoomSession`] and
//! [`MessageLog`] together behind a single entry point. Every call follows the
//! same shape: snapshot the observable state, apply the event, drain queued
//! frames, then diff against the snapshot to produce notifications. A change
//! therefore surfaces exactly once, no matter which component caused it.

use huddle_proto::Event;

use crate::{
    ClientAction, ClientError, ClientEvent, ConnectionState, Dispatcher, DispatcherStats,
    MessageLog, RoomSession, Transport,
};

/// Observable state captured before an event is applied.
struct Snapshot {
    state: ConnectionState,
    session: RoomSession,
    errors: u64,
    last_error: String,
    log_len: usize,
}

/// Room-chat client.
#[derive(Debug, Clone, Default)]
pub struct Client {
    /// Connection lifecycle and outgoing queue.
    transport: Transport,
    /// Inbound frame router.
    dispatcher: Dispatcher,
    /// Current room.
    session: RoomSession,
    /// Rendered inbound events.
    log: MessageLog,
}

impl Client {
    /// Create a disconnected client with no room and an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event and return actions to execute.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotInRoom` for `LeaveRoom` while not in a room
    /// - `ClientError::Protocol` for an inbound frame that failed to decode
    ///
    /// Neither error changes any state. The caller should log and continue.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Connect { url } => Ok(self.connect(url)),
            ClientEvent::Opened => Ok(self.apply(|c| {
                tracing::info!(url = c.transport.url().unwrap_or_default(), "connected");
                c.transport.on_open();
            })),
            ClientEvent::Closed => Ok(self.apply(|c| {
                tracing::info!("disconnected");
                c.transport.on_close();
            })),
            ClientEvent::TransportFailed { reason } => Ok(self.apply(|c| {
                tracing::warn!(%reason, "connection failed");
                c.transport.on_failure(&reason);
            })),
            ClientEvent::FrameReceived(frame) => self.receive(&frame),
            ClientEvent::CreateRoom { name } => Ok(self.create_room(name)),
            ClientEvent::JoinRoom { code, username } => Ok(self.join_room(code, username)),
            ClientEvent::LeaveRoom => self.leave_room(),
            ClientEvent::SendMessage { username, message } => {
                Ok(self.send_message(username, message))
            },
        }
    }

    /// Request a connection to `url`.
    ///
    /// Returns an `Open` action; nothing else changes until the caller reports
    /// `Opened` or `TransportFailed`.
    pub fn connect(&mut self, url: impl Into<String>) -> Vec<ClientAction> {
        let before = self.snapshot();
        let url = self.transport.connect(url);
        self.finish(&before, vec![ClientAction::Open { url }])
    }

    /// Send an arbitrary event.
    ///
    /// While disconnected nothing is written and an `Error` action reports
    /// [`crate::NOT_CONNECTED`].
    pub fn send(&mut self, event: &Event) -> Vec<ClientAction> {
        self.apply(|c| c.transport.send(event))
    }

    /// Create a room named `name`. See [`RoomSession::create_room`].
    pub fn create_room(&mut self, name: impl Into<String>) -> Vec<ClientAction> {
        self.apply(|c| c.session.create_room(&mut c.transport, name))
    }

    /// Join room `code` as `username`. See [`RoomSession::join_room`].
    pub fn join_room(
        &mut self,
        code: impl Into<String>,
        username: impl Into<String>,
    ) -> Vec<ClientAction> {
        self.apply(|c| c.session.join_room(&mut c.transport, code, username))
    }

    /// Leave the current room. See [`RoomSession::leave_room`].
    ///
    /// # Errors
    ///
    /// - `ClientError::NotInRoom` if no room code is held
    pub fn leave_room(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let before = self.snapshot();
        self.session.leave_room(&mut self.transport)?;
        Ok(self.finish(&before, Vec::new()))
    }

    /// Send a chat message to the current room.
    pub fn send_message(
        &mut self,
        username: impl Into<String>,
        message: impl Into<String>,
    ) -> Vec<ClientAction> {
        let event = Event::chat(username, message);
        self.send(&event)
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.transport.state()
    }

    /// Last transport error. Empty if none.
    pub fn last_error(&self) -> &str {
        self.transport.last_error()
    }

    /// Rendered inbound events, oldest first.
    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    /// Current room code. Empty if not in a room.
    pub fn room_code(&self) -> &str {
        self.session.room_code()
    }

    /// Current room name. Empty if unknown or not in a room.
    pub fn room_name(&self) -> &str {
        self.session.room_name()
    }

    /// Current room session.
    pub fn session(&self) -> &RoomSession {
        &self.session
    }

    /// Connection lifecycle.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Inbound routing counters.
    pub fn dispatcher_stats(&self) -> DispatcherStats {
        self.dispatcher.stats()
    }

    fn receive(&mut self, frame: &str) -> Result<Vec<ClientAction>, ClientError> {
        let before = self.snapshot();
        self.dispatcher.dispatch(frame, &mut self.session, &mut self.log)?;
        Ok(self.finish(&before, Vec::new()))
    }

    fn apply(&mut self, f: impl FnOnce(&mut Self)) -> Vec<ClientAction> {
        let before = self.snapshot();
        f(self);
        self.finish(&before, Vec::new())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.transport.state(),
            session: self.session.clone(),
            errors: self.transport.error_count(),
            last_error: self.transport.last_error().to_string(),
            log_len: self.log.len(),
        }
    }

    fn finish(&mut self, before: &Snapshot, mut actions: Vec<ClientAction>) -> Vec<ClientAction> {
        actions.extend(self.transport.take_outgoing().into_iter().map(ClientAction::Send));

        if self.transport.state() != before.state {
            actions.push(ClientAction::ConnectionChanged(self.transport.state()));
        }

        if self.session != before.session {
            actions.push(ClientAction::RoomChanged {
                room_code: self.session.room_code().to_string(),
                room_name: self.session.room_name().to_string(),
            });
        }

        let last_error = self.transport.last_error();
        if self.transport.error_count() != before.errors && !last_error.is_empty() {
            actions.push(ClientAction::Error { message: last_error.to_string() });
        } else if last_error.is_empty() && !before.last_error.is_empty() {
            actions.push(ClientAction::ErrorCleared);
        }

        let appended = self.log.since(before.log_len).iter().cloned();
        actions.extend(appended.map(ClientAction::LogAppended));
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NOT_CONNECTED;

    fn connected() -> Client {
        let mut client = Client::new();
        let _ = client.connect("ws://x");
        let _ = client.handle(ClientEvent::Opened);
        client
    }

    #[test]
    fn connect_emits_open_only() {
        let mut client = Client::new();

        let actions = client.handle(ClientEvent::Connect { url: "ws://x".into() }).unwrap();

        assert_eq!(actions, vec![ClientAction::Open { url: "ws://x".into() }]);
        assert_eq!(client.connection_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn open_then_close() {
        let mut client = Client::new();
        let _ = client.connect("ws://x");

        let actions = client.handle(ClientEvent::Opened).unwrap();
        assert_eq!(actions, vec![ClientAction::ConnectionChanged(ConnectionState::Connected)]);
        assert_eq!(client.last_error(), "");

        let actions = client.handle(ClientEvent::Closed).unwrap();
        assert_eq!(actions, vec![ClientAction::ConnectionChanged(ConnectionState::Disconnected)]);
    }

    #[test]
    fn close_while_disconnected_is_silent() {
        let mut client = Client::new();

        let actions = client.handle(ClientEvent::Closed).unwrap();

        assert!(actions.is_empty());
        assert_eq!(client.connection_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn transport_failure_reports_error() {
        let mut client = Client::new();
        let _ = client.connect("ws://x");

        let actions =
            client.handle(ClientEvent::TransportFailed { reason: "refused".into() }).unwrap();

        assert_eq!(
            actions,
            vec![ClientAction::Error { message: "connection failed: refused".into() }]
        );
    }

    #[test]
    fn reopen_clears_error_once() {
        let mut client = Client::new();
        let _ = client.send_message("alice", "hi");
        let _ = client.handle(ClientEvent::Closed).unwrap();

        let actions = client.handle(ClientEvent::Opened).unwrap();

        assert_eq!(
            actions,
            vec![
                ClientAction::ConnectionChanged(ConnectionState::Connected),
                ClientAction::ErrorCleared,
            ]
        );
        assert_eq!(client.last_error(), "");

        let actions = client.handle(ClientEvent::Closed).unwrap();
        assert_eq!(actions, vec![ClientAction::ConnectionChanged(ConnectionState::Disconnected)]);
    }

    #[test]
    fn send_while_disconnected_reports_every_time() {
        let mut client = Client::new();

        for _ in 0..2 {
            let actions = client.send_message("alice", "hi");
            assert_eq!(actions, vec![ClientAction::Error { message: NOT_CONNECTED.into() }]);
        }
    }

    #[test]
    fn create_room_sends_then_notifies() {
        let mut client = connected();

        let actions = client.create_room("Foo");

        assert_eq!(
            actions,
            vec![
                ClientAction::Send(r#"{"type":"create_room","payload":{"room_name":"Foo"}}"#.into()),
                ClientAction::RoomChanged { room_code: String::new(), room_name: "Foo".into() },
            ]
        );
    }

    #[test]
    fn room_created_ack_fills_code_and_logs() {
        let mut client = connected();
        let _ = client.create_room("Foo");

        let actions = client
            .handle(ClientEvent::FrameReceived(
                r#"{"type":"room_created","payload":{"room_code":"ABC123","room_name":"Foo"}}"#
                    .into(),
            ))
            .unwrap();

        assert_eq!(
            actions,
            vec![
                ClientAction::RoomChanged { room_code: "ABC123".into(), room_name: "Foo".into() },
                ClientAction::LogAppended("Room created successfully! Room Code: ABC123".into()),
            ]
        );
    }

    #[test]
    fn leave_without_room_is_an_error_and_sends_nothing() {
        let mut client = connected();

        assert_eq!(client.handle(ClientEvent::LeaveRoom), Err(ClientError::NotInRoom));
        assert_eq!(client.last_error(), "");
    }

    #[test]
    fn leave_clears_room() {
        let mut client = connected();
        let _ = client.join_room("XYZ", "alice");

        let actions = client.leave_room().unwrap();

        assert_eq!(
            actions,
            vec![
                ClientAction::Send(r#"{"type":"leave_room","payload":{}}"#.into()),
                ClientAction::RoomChanged { room_code: String::new(), room_name: String::new() },
            ]
        );
    }

    #[test]
    fn malformed_frame_returns_error_and_keeps_state() {
        let mut client = connected();
        let _ = client.join_room("XYZ", "alice");

        let result = client.handle(ClientEvent::FrameReceived("{not json".into()));

        assert!(matches!(result, Err(ClientError::Protocol(_))));
        assert_eq!(client.room_code(), "XYZ");
        assert!(client.messages().is_empty());
        assert_eq!(client.dispatcher_stats().dropped, 1);
    }

    #[test]
    fn chat_frame_is_logged() {
        let mut client = connected();

        let actions = client
            .handle(ClientEvent::FrameReceived(
                r#"{"type":"send_message","payload":{"username":"bob","message":"yo"}}"#.into(),
            ))
            .unwrap();

        assert_eq!(actions, vec![ClientAction::LogAppended("bob: yo".into())]);
        assert_eq!(client.messages().lines(), ["bob: yo"]);
    }
}
