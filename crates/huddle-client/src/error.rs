//! Client error types.

use huddle_proto::ProtocolError;
use thiserror::Error;

/// Errors returned by [`crate::Client::handle`].
///
/// None of these are fatal to the connection or the process. The client state
/// is left unchanged and the caller is expected to log and continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Leave requested while not in a room.
    ///
    /// Nothing was sent. Local misuse only; the server never sees it.
    #[error("not in a room")]
    NotInRoom,

    /// Inbound frame could not be decoded and was dropped.
    #[error("dropped inbound frame: {0}")]
    Protocol(#[from] ProtocolError),
}
