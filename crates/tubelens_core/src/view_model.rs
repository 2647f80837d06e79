use crate::{ConnectionStatus, RequestKey, ViewNode};

/// Snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connection: ConnectionStatus,
    pub input: String,
    /// Render target contents, most recent first.
    pub nodes: Vec<ViewNode>,
    pub pending: Vec<RequestKey>,
    pub dirty: bool,
}
