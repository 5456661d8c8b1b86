//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from terminal and network I/O.
//! The production driver reads stdin and talks WebSocket; tests use a scripted
//! in-memory driver. Both run the same [`crate::Runtime`].

use std::future::Future;

/// Something the runtime must react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverInput {
    /// A line typed by the user, without the trailing newline.
    Line(String),
    /// A connection requested through [`Driver::open`] is now open.
    Opened,
    /// A text frame arrived from the server.
    Frame(String),
    /// The open connection closed.
    Closed {
        /// Why it closed.
        reason: String,
    },
    /// A connection requested through [`Driver::open`] could not be opened.
    Failed {
        /// Why it failed.
        reason: String,
    },
}

/// Abstracts I/O operations for the runtime.
///
/// Connection outcomes are reported asynchronously: [`Driver::open`] only
/// starts the attempt, and the driver later yields [`DriverInput::Opened`] or
/// [`DriverInput::Failed`] from [`Driver::next_input`].
pub trait Driver: Send {
    /// Platform-specific error type.
    ///
    /// Fatal to the runtime everywhere except [`Driver::send_frame`].
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input.
    ///
    /// Returns `None` when the user input is exhausted.
    fn next_input(
        &mut self,
    ) -> impl Future<Output = Result<Option<DriverInput>, Self::Error>> + Send;

    /// Start connecting to `url`, replacing any current connection.
    fn open(&mut self, url: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Write a text frame to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no open connection. The runtime reports
    /// this to the client as a transport failure and keeps going.
    fn send_frame(&mut self, frame: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Show one line of output.
    fn render(&mut self, line: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Close the connection and release resources.
    fn stop(&mut self);
}
