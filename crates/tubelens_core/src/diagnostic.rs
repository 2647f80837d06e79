use thiserror::Error;

use crate::{RequestError, RequestKey};

/// A non-fatal failure recorded while handling one event.
///
/// None of these abort processing: the event degrades to "nothing rendered"
/// (or, for partial data, "that element skipped").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("frame is not valid JSON: {0}")]
    Parse(String),
    #[error("frame matches no known response shape")]
    ShapeMismatch,
    #[error("video entry {index} skipped, missing {}", .missing.join(", "))]
    PartialData {
        index: usize,
        missing: Vec<&'static str>,
    },
    #[error("reply for {key} arrived while it was not pending")]
    LateReply { key: RequestKey },
    #[error("{variant} reply arrived with no matching pending request")]
    UncorrelatedReply { variant: &'static str },
    #[error("request for {key} was not sent: {detail}")]
    SendRejected { key: RequestKey, detail: String },
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
}
