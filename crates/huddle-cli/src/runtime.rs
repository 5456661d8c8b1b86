//! Generic runtime for terminal sessions.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`Client`]: Sans-IO protocol state machine
//! - [`Driver`]: Platform-specific I/O
//!
//! Input lines are parsed into commands, commands and driver inputs become
//! [`ClientEvent`]s, and the resulting [`ClientAction`]s are executed through
//! the driver. A failed write feeds a transport failure back into the client
//! through the same work queue.

use std::collections::VecDeque;

use huddle_client::{Client, ClientAction, ClientError, ClientEvent};

use crate::{
    Driver, DriverInput, RuntimeConfig,
    command::{self, Command, HELP},
};

/// Generic runtime that orchestrates Client and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    client: Client,
    config: RuntimeConfig,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver.
    pub fn new(driver: D, config: RuntimeConfig) -> Self {
        Self { driver, client: Client::new(), config }
    }

    /// Run the main event loop until `/quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to read input or render output.
    pub async fn run(mut self) -> Result<(), D::Error> {
        if self.config.auto_connect {
            let url = self.config.url.clone();
            self.dispatch(ClientEvent::Connect { url }).await?;
        }

        while let Some(input) = self.driver.next_input().await? {
            if self.process_input(input).await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one driver input.
    ///
    /// Returns `true` if the runtime should quit.
    pub async fn process_input(&mut self, input: DriverInput) -> Result<bool, D::Error> {
        let event = match input {
            DriverInput::Line(line) => return self.process_line(&line).await,
            DriverInput::Opened => ClientEvent::Opened,
            DriverInput::Frame(frame) => ClientEvent::FrameReceived(frame),
            DriverInput::Closed { reason } => {
                tracing::info!(%reason, "connection closed");
                ClientEvent::Closed
            },
            DriverInput::Failed { reason } => ClientEvent::TransportFailed { reason },
        };

        self.dispatch(event).await?;
        Ok(false)
    }

    /// Handle one line of user input.
    async fn process_line(&mut self, line: &str) -> Result<bool, D::Error> {
        let event = match command::parse(line) {
            Command::Empty => return Ok(false),
            Command::Quit => return Ok(true),
            Command::Help => {
                for line in HELP.lines() {
                    self.driver.render(line).await?;
                }
                return Ok(false);
            },
            Command::Status => {
                self.render_status().await?;
                return Ok(false);
            },
            Command::Unknown { command } => {
                let line = format!("[error] unknown command /{command}, try /help");
                self.driver.render(&line).await?;
                return Ok(false);
            },
            Command::InvalidArgs { command, error } => {
                self.driver.render(&format!("[error] /{command}: {error}")).await?;
                return Ok(false);
            },
            Command::Connect { url } => {
                ClientEvent::Connect { url: url.unwrap_or_else(|| self.config.url.clone()) }
            },
            Command::CreateRoom { name } => ClientEvent::CreateRoom { name },
            Command::JoinRoom { code, username } => ClientEvent::JoinRoom {
                code,
                username: username.unwrap_or_else(|| self.config.username.clone()),
            },
            Command::LeaveRoom => ClientEvent::LeaveRoom,
            Command::Message { text } => {
                ClientEvent::SendMessage { username: self.config.username.clone(), message: text }
            },
        };

        self.dispatch(event).await?;
        Ok(false)
    }

    /// Feed an event to the client and execute everything that follows.
    async fn dispatch(&mut self, event: ClientEvent) -> Result<(), D::Error> {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let actions = match self.client.handle(event) {
                Ok(actions) => actions,
                Err(ClientError::NotInRoom) => {
                    tracing::warn!("leave requested while not in a room");
                    self.driver.render("[error] not in a room").await?;
                    continue;
                },
                Err(e @ ClientError::Protocol(_)) => {
                    tracing::debug!(error = %e, "inbound frame dropped");
                    continue;
                },
            };

            for action in actions {
                self.execute(action, &mut pending).await?;
            }
        }

        Ok(())
    }

    /// Execute one client action.
    async fn execute(
        &mut self,
        action: ClientAction,
        pending: &mut VecDeque<ClientEvent>,
    ) -> Result<(), D::Error> {
        match action {
            ClientAction::Open { url } => self.driver.open(&url).await,
            ClientAction::Send(frame) => {
                if let Err(e) = self.driver.send_frame(frame).await {
                    tracing::warn!(error = %e, "failed to write frame");
                    pending.push_back(ClientEvent::TransportFailed { reason: e.to_string() });
                }
                Ok(())
            },
            ClientAction::ConnectionChanged(state) => {
                self.driver.render(&format!("[connection] {state}")).await
            },
            ClientAction::RoomChanged { room_code, room_name } => {
                self.driver.render(&format!("[room] code={room_code} name={room_name}")).await
            },
            ClientAction::Error { message } => {
                self.driver.render(&format!("[error] {message}")).await
            },
            ClientAction::ErrorCleared => {
                tracing::debug!("last error cleared");
                Ok(())
            },
            ClientAction::LogAppended(line) => self.driver.render(&line).await,
        }
    }

    async fn render_status(&mut self) -> Result<(), D::Error> {
        let url = self.client.transport().url().unwrap_or("-").to_string();
        let lines = [
            format!("[status] connection={} url={url}", self.client.connection_state()),
            format!(
                "[status] room code={} name={}",
                self.client.room_code(),
                self.client.room_name()
            ),
            format!("[status] messages={}", self.client.messages().len()),
        ];
        for line in &lines {
            self.driver.render(line).await?;
        }

        let last_error = self.client.last_error().to_string();
        if !last_error.is_empty() {
            self.driver.render(&format!("[status] last error: {last_error}")).await?;
        }
        Ok(())
    }

    /// Get a reference to the Client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
