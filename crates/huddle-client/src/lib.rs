//! Client
//!
//! Action-based client state machine for the Huddle room-chat protocol.
//! Tracks the connection lifecycle, routes inbound frames, and reconciles the
//! local room membership against server acknowledgements.
//!
//! # Architecture
//!
//! The client is Sans-IO. It receives events ([`ClientEvent`]) such as "socket
//! opened", "frame received" or "user wants to join room XYZ", processes them
//! through pure state machine logic, and returns actions ([`ClientAction`])
//! for the caller to execute: open a socket, write a frame, redraw part of the
//! UI.
//!
//! # Components
//!
//! - [`Client`]: Top-level state machine, the only entry point callers need
//! - [`Transport`]: Connection state, last error, and the outgoing frame queue
//! - [`Dispatcher`]: Decodes inbound frames and routes them by discriminant
//! - [`RoomSession`]: Room membership with optimistic local updates
//! - [`MessageLog`]: Append-only transcript of rendered inbound events
//!
//! # Transport (optional)
//!
//! With the `websocket` feature enabled, this crate also provides:
//! - [`websocket::ConnectedClient`]: Channels bridged to a live WebSocket
//! - [`websocket::connect`]: Connect to a server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod dispatcher;
mod error;
mod event;
mod room;
mod state;
mod transport;

#[cfg(feature = "websocket")]
pub mod websocket;

pub use client::Client;
pub use dispatcher::{Dispatcher, DispatcherStats, Routed, render_line};
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent};
pub use huddle_proto::{Event, EventKind, ProtocolError};
pub use room::RoomSession;
pub use state::{ConnectionState, MessageLog};
pub use transport::{NOT_CONNECTED, Transport};
