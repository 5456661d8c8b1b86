//! Terminal driver.
//!
//! Implements the [`Driver`] trait over stdin/stdout for input and output and
//! the WebSocket transport for the network. Logs go to stderr so they never
//! interleave with the transcript.

use std::{collections::VecDeque, io};

use huddle_client::websocket::{self, ConnectedClient, Inbound, TransportConfig};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::{Driver, DriverInput};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// I/O error from stdin or stdout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Frame written while no connection is open.
    #[error("not connected")]
    NotConnected,

    /// The connection task is gone.
    #[error("connection channel closed")]
    ChannelClosed,
}

/// What woke the driver up.
enum Wake {
    Line(Option<String>),
    Inbound(Option<Inbound>),
}

/// Terminal driver implementing the [`Driver`] trait.
pub struct TerminalDriver {
    input: Lines<BufReader<Stdin>>,
    output: Stdout,
    connection: Option<ConnectedClient>,
    transport: TransportConfig,
    /// Inputs produced by `open` that `next_input` has not yet returned.
    pending: VecDeque<DriverInput>,
}

impl TerminalDriver {
    /// Create a driver reading stdin and writing stdout.
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
            output: tokio::io::stdout(),
            connection: None,
            transport,
            pending: VecDeque::new(),
        }
    }
}

impl Driver for TerminalDriver {
    type Error = DriverError;

    async fn next_input(&mut self) -> Result<Option<DriverInput>, DriverError> {
        if let Some(input) = self.pending.pop_front() {
            return Ok(Some(input));
        }

        let wake = match self.connection.as_mut() {
            Some(conn) => tokio::select! {
                line = self.input.next_line() => Wake::Line(line?),
                inbound = conn.from_server.recv() => Wake::Inbound(inbound),
            },
            None => Wake::Line(self.input.next_line().await?),
        };

        Ok(match wake {
            Wake::Line(line) => line.map(DriverInput::Line),
            Wake::Inbound(Some(Inbound::Frame(frame))) => Some(DriverInput::Frame(frame)),
            Wake::Inbound(Some(Inbound::Closed { reason })) => {
                self.connection = None;
                Some(DriverInput::Closed { reason })
            },
            Wake::Inbound(None) => {
                self.connection = None;
                Some(DriverInput::Closed { reason: "connection task ended".to_string() })
            },
        })
    }

    async fn open(&mut self, url: &str) -> Result<(), DriverError> {
        if let Some(old) = self.connection.take() {
            old.stop();
            self.pending.push_back(DriverInput::Closed { reason: "replaced".to_string() });
        }

        match websocket::connect_with_config(url, self.transport).await {
            Ok(conn) => {
                self.connection = Some(conn);
                self.pending.push_back(DriverInput::Opened);
            },
            Err(e) => {
                self.pending.push_back(DriverInput::Failed { reason: e.to_string() });
            },
        }
        Ok(())
    }

    async fn send_frame(&mut self, frame: String) -> Result<(), DriverError> {
        let conn = self.connection.as_ref().ok_or(DriverError::NotConnected)?;
        conn.to_server.send(frame).await.map_err(|_| DriverError::ChannelClosed)
    }

    async fn render(&mut self, line: &str) -> Result<(), DriverError> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.stop();
        }
    }
}
