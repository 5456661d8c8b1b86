//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles WebSocket I/O for text frames.
//! This is a thin layer that only moves strings. Decoding, routing and all
//! state live in the Sans-IO [`crate::Client`].

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("{0}")]
    Connection(String),

    /// Reading from or writing to an open socket failed.
    #[error("stream error: {0}")]
    Stream(String),

    /// The handshake did not finish in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound on TCP connect plus WebSocket handshake.
    pub connect_timeout: Duration,
    /// Capacity of each direction's channel.
    pub channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { connect_timeout: Duration::from_secs(5), channel_capacity: 32 }
    }
}

/// Something that arrived from the server side of the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A text frame.
    Frame(String),
    /// The connection is gone. Sent once, always last.
    Closed {
        /// Why the connection ended.
        reason: String,
    },
}

/// Handle to a connected client with WebSocket transport.
///
/// Frames are sent and received via the channels; an internal task handles
/// the socket. Dropping `to_server` closes the socket gracefully.
pub struct ConnectedClient {
    /// Send text frames to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive frames from the server, then one `Closed`.
    pub from_server: mpsc::Receiver<Inbound>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection immediately.
    ///
    /// No `Closed` is delivered after an abort.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect to a Huddle server with default settings.
///
/// # Errors
///
/// See [`connect_with_config`].
pub async fn connect(url: &str) -> Result<ConnectedClient, TransportError> {
    connect_with_config(url, TransportConfig::default()).await
}

/// Connect to a Huddle server.
///
/// Returns a [`ConnectedClient`] with channels for frame transport.
///
/// # Errors
///
/// - `TransportError::Connection` if the URL is invalid, the TCP connect
///   fails, or the server rejects the handshake
/// - `TransportError::Timeout` if the handshake exceeds
///   `config.connect_timeout`
pub async fn connect_with_config(
    url: &str,
    config: TransportConfig,
) -> Result<ConnectedClient, TransportError> {
    let (ws, _response) =
        tokio::time::timeout(config.connect_timeout, tokio_tungstenite::connect_async(url))
            .await
            .map_err(|_| TransportError::Timeout(config.connect_timeout))?
            .map_err(|e| TransportError::Connection(e.to_string()))?;

    tracing::debug!(%url, "websocket handshake complete");

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(config.channel_capacity);
    let (from_server_tx, from_server_rx) = mpsc::channel::<Inbound>(config.channel_capacity);

    let handle = tokio::spawn(run_connection(ws, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    ws: WsStream,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<Inbound>,
) {
    let (mut sink, mut stream) = ws.split();

    let reason = loop {
        tokio::select! {
            outgoing = to_server.recv() => match outgoing {
                Some(frame) => {
                    if let Err(e) = sink.send(Message::Text(frame.into())).await {
                        break TransportError::Stream(format!("write failed: {e}")).to_string();
                    }
                },
                None => {
                    let _ = sink.close().await;
                    break "closed by client".to_string();
                },
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if from_server.send(Inbound::Frame(text.as_str().to_owned())).await.is_err() {
                        break "receiver dropped".to_string();
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    // Flushes the close reply tungstenite queued on receipt.
                    let _ = sink.close().await;
                    break match frame {
                        Some(f) if !f.reason.is_empty() => f.reason.as_str().to_owned(),
                        Some(f) => format!("closed by server ({})", f.code),
                        None => "closed by server".to_string(),
                    };
                },
                // Binary, ping, pong: tungstenite answers pings itself.
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    break TransportError::Stream(format!("read failed: {e}")).to_string();
                },
                None => break "connection reset".to_string(),
            },
        }
    };

    tracing::debug!(%reason, "websocket closed");
    let _ = from_server.send(Inbound::Closed { reason }).await;
}
