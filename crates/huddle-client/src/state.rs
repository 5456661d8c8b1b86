//! Observable client state.
//!
//! These are the values a UI reads to render itself: whether the socket is up
//! and what the server has told us so far.

use std::fmt;

/// Connection state.
///
/// There is no `Connecting` state. Opening a socket is fire-and-forget until
/// the transport reports that it opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Socket closed or never opened.
    #[default]
    Disconnected,
    /// Socket open; frames can be written.
    Connected,
}

impl ConnectionState {
    /// Whether frames can be written.
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connected => f.write_str("connected"),
        }
    }
}

/// Append-only transcript of rendered inbound events.
///
/// Lines are kept in wire arrival order. Nothing is ever removed, reordered,
/// or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    lines: Vec<String>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after the first `offset` lines.
    pub fn since(&self, offset: usize) -> &[String] {
        self.lines.get(offset..).unwrap_or_default()
    }

    /// Most recent line. `None` if the log is empty.
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Whether any line equals `line`.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
