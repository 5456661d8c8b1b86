//! Huddle wire protocol
//!
//! Every frame on the wire is a UTF-8 JSON text message of the shape
//! `{ "type": <discriminant>, "payload": <object> }`. The discriminant selects
//! the payload shape; the full set lives in [`EventKind`].
//!
//! # Components
//!
//! - [`Event`]: Tagged union of every message the protocol knows about
//! - [`EventKind`]: Payload-free discriminant with wire names and direction
//! - [`payloads`]: One struct per payload shape
//! - [`ProtocolError`]: Decode and encode failures
//!
//! # Forward compatibility
//!
//! Decoding an unknown discriminant is not an error: [`Event::decode`] returns
//! `Ok(None)` so a newer server can add message kinds without breaking older
//! clients. Unknown payload fields are ignored for the same reason.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod event;
pub mod payloads;

pub use errors::{ProtocolError, Result};
pub use event::{Direction, Event, EventKind, MAX_FRAME_SIZE};
