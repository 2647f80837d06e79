use std::time::Duration;

use thiserror::Error;

/// Lifecycle and payload events, delivered in the order the transport yields them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened,
    /// One inbound text frame, untouched.
    Message(String),
    Closed { reason: Option<String> },
    Error(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("binary frame is not valid UTF-8")]
    InvalidUtf8,
    #[error("could not start connection runtime: {0}")]
    Runtime(String),
}

/// Why a request could not be written. Sends are never buffered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("connection is not open")]
    NotOpen,
    #[error("connection writer has shut down")]
    Closed,
    #[error("could not encode message: {0}")]
    Encode(String),
}
