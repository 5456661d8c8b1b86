//! Runtime configuration.

use std::time::Duration;

use huddle_client::websocket::TransportConfig;

/// Default server URL.
pub const DEFAULT_URL: &str = "ws://localhost:8080/ws";

/// Default display name.
pub const DEFAULT_USERNAME: &str = "anonymous";

/// Settings for one terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Server to connect to at startup and on a bare `/connect`.
    pub url: String,
    /// Name used for chat messages and for `/join` without a username.
    pub username: String,
    /// Connect to `url` before reading any input.
    pub auto_connect: bool,
    /// Upper bound on connecting to the server.
    pub connect_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            auto_connect: true,
            connect_timeout: Duration::from_millis(5000),
        }
    }
}

impl RuntimeConfig {
    /// WebSocket settings derived from this config.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig { connect_timeout: self.connect_timeout, ..TransportConfig::default() }
    }
}
