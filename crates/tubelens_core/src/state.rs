use client_logging::{client_error, client_warn};

use crate::view_model::AppViewModel;
use crate::{BackendNotices, Diagnostic, RenderStateStore, RenderTarget};

/// Oldest diagnostics are dropped once this many are waiting to be drained.
const MAX_DIAGNOSTICS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Open,
    Closed,
    Failed,
}

/// How a video result list is matched to the request it answers.
///
/// The protocol carries no correlation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyCorrelation {
    /// Use the query text in the input box at the time the reply is rendered.
    /// A stale reply can attach to a newer query.
    #[default]
    InputText,
    /// Use the oldest query that is still pending.
    OldestPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcilerOptions {
    pub reply_correlation: ReplyCorrelation,
    pub backend_notices: BackendNotices,
}

/// Session state owned by the event loop and rewritten only by `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    options: ReconcilerOptions,
    connection: ConnectionStatus,
    input: String,
    target: RenderTarget,
    render_state: RenderStateStore,
    diagnostics: Vec<Diagnostic>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReconcilerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            connection: self.connection,
            input: self.input.clone(),
            nodes: self.target.nodes().to_vec(),
            pending: self.render_state.pending_keys().to_vec(),
            dirty: self.dirty,
        }
    }

    pub fn options(&self) -> ReconcilerOptions {
        self.options
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn render_state(&self) -> &RenderStateStore {
        &self.render_state
    }

    /// Diagnostics recorded since the last [`AppState::take_diagnostics`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionStatus) {
        if self.connection != connection {
            self.connection = connection;
            self.mark_dirty();
        }
    }

    pub(crate) fn target_mut(&mut self) -> &mut RenderTarget {
        &mut self.target
    }

    pub(crate) fn render_state_mut(&mut self) -> &mut RenderStateStore {
        &mut self.render_state
    }

    /// Logs `diagnostic` and keeps it for the caller to drain.
    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::Transport(_) | Diagnostic::Parse(_) | Diagnostic::SendRejected { .. } => {
                client_error!("{diagnostic}");
            }
            _ => client_warn!("{diagnostic}"),
        }
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.remove(0);
        }
        self.diagnostics.push(diagnostic);
    }
}
