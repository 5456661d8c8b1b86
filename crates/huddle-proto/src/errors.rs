//! Protocol error types.

use thiserror::Error;

use crate::EventKind;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding frames.
///
/// None of these are fatal to a connection. A frame that fails to decode is
/// dropped by the receiver and the next frame is processed normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Frame is not a JSON object with a string `type` field.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Discriminant is known but the payload does not match its shape.
    #[error("malformed {kind} payload: {reason}")]
    MalformedPayload {
        /// Discriminant of the offending frame.
        kind: EventKind,
        /// Deserializer message.
        reason: String,
    },

    /// Frame exceeds [`crate::MAX_FRAME_SIZE`].
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge {
        /// Actual frame size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        max: usize,
    },

    /// Serialization failed.
    #[error("failed to encode {kind} frame: {reason}")]
    Encode {
        /// Discriminant of the event being encoded.
        kind: EventKind,
        /// Serializer message.
        reason: String,
    },
}
