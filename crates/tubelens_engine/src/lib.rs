//! Tubelens engine: the single duplex connection to the backend.
mod connection;
mod settings;
mod types;

pub use connection::{ConnectionHandle, EventStream};
pub use settings::{ConnectionSettings, DEFAULT_ENDPOINT};
pub use types::{ConnectionEvent, SendError, TransportError};
