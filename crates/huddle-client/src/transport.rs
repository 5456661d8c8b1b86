//! Connection lifecycle and outgoing frame queue.
//!
//! [`Transport`] is the sole owner of everything connection-related: the
//! target URL, whether the socket is open, the last transport error, and the
//! frames waiting to be written. It never touches a socket itself; the caller
//! drains [`Transport::take_outgoing`] and reports lifecycle changes back
//! through [`Transport::on_open`], [`Transport::on_close`] and
//! [`Transport::on_failure`].

use huddle_proto::Event;

use crate::ConnectionState;

/// Error value set when a send is attempted while disconnected.
pub const NOT_CONNECTED: &str = "transport not connected";

/// Sans-IO connection state.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    /// Current connection state.
    state: ConnectionState,
    /// Last transport error. Empty if none.
    last_error: String,
    /// Number of times an error has been recorded.
    errors: u64,
    /// URL of the most recent `connect` call. `None` before the first one.
    url: Option<String>,
    /// Encoded frames waiting to be written, oldest first.
    outgoing: Vec<String>,
}

impl Transport {
    /// Create a disconnected transport with no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the target URL and request that the caller open it.
    ///
    /// Nothing observable changes until the caller reports the outcome via
    /// [`Transport::on_open`] or [`Transport::on_failure`]. Returns the URL to
    /// open.
    pub fn connect(&mut self, url: impl Into<String>) -> String {
        let url = url.into();
        tracing::info!(%url, "connecting");
        self.url = Some(url.clone());
        url
    }

    /// The socket opened.
    pub fn on_open(&mut self) {
        self.state = ConnectionState::Connected;
        self.last_error.clear();
    }

    /// The socket closed.
    ///
    /// No reconnection is scheduled.
    pub fn on_close(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// Opening the socket failed, or it errored out.
    pub fn on_failure(&mut self, reason: &str) {
        self.state = ConnectionState::Disconnected;
        self.set_error(format!("connection failed: {reason}"));
    }

    /// Queue `event` for writing.
    ///
    /// Never fails loudly. While disconnected nothing is queued and the last
    /// error becomes [`NOT_CONNECTED`]. Failures are visible through
    /// [`Transport::last_error`] and [`Transport::error_count`].
    pub fn send(&mut self, event: &Event) {
        if !self.state.is_connected() {
            tracing::debug!(kind = %event.kind(), "send while disconnected");
            self.set_error(NOT_CONNECTED.to_string());
            return;
        }

        match event.encode() {
            Ok(frame) => self.outgoing.push(frame),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode outgoing event");
                self.set_error(e.to_string());
            },
        }
    }

    fn set_error(&mut self, message: String) {
        self.last_error = message;
        self.errors += 1;
    }

    /// Take pending outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Last transport error. Empty if none.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Number of errors recorded so far, including repeats of the same message.
    pub fn error_count(&self) -> u64 {
        self.errors
    }

    /// URL of the most recent `connect` call.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
