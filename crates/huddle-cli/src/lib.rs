//! Terminal client for Huddle
//!
//! A thin line-oriented shell over [`huddle_client::Client`]. Lines typed on
//! stdin become room commands or chat messages; server traffic and state
//! changes are printed to stdout as they happen.
//!
//! # Components
//!
//! - [`Runtime`]: Generic orchestration loop using a [`Driver`]
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`TerminalDriver`]: stdin/stdout plus WebSocket implementation
//! - [`command`]: Input line parser
//! - [`RuntimeConfig`]: Session settings

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
mod config;
mod driver;
mod runtime;
pub mod terminal;

pub use config::{DEFAULT_URL, DEFAULT_USERNAME, RuntimeConfig};
pub use driver::{Driver, DriverInput};
pub use runtime::Runtime;
pub use terminal::{DriverError, TerminalDriver};
