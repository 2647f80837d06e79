use crate::RequestKey;

/// Tracks which requests are in flight.
///
/// Only pending keys are stored: settling a key removes it, so the store never
/// outgrows the set of outstanding requests. Keys keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderStateStore {
    pending: Vec<RequestKey>,
}

impl RenderStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as pending. Returns `false` if it already was.
    pub fn begin_pending(&mut self, key: RequestKey) -> bool {
        if self.is_pending(&key) {
            return false;
        }
        self.pending.push(key);
        true
    }

    /// Pending -> Resolved. Returns `false` if `key` was not pending.
    pub fn resolve(&mut self, key: &RequestKey) -> bool {
        self.settle(key)
    }

    /// Pending -> Failed. Returns `false` if `key` was not pending.
    pub fn fail(&mut self, key: &RequestKey) -> bool {
        self.settle(key)
    }

    pub fn is_pending(&self, key: &RequestKey) -> bool {
        self.pending.contains(key)
    }

    pub fn pending_keys(&self) -> &[RequestKey] {
        &self.pending
    }

    pub fn oldest_pending_query(&self) -> Option<&RequestKey> {
        self.pending.iter().find(|key| key.is_query())
    }

    pub fn oldest_pending_channel(&self) -> Option<&RequestKey> {
        self.pending.iter().find(|key| key.is_channel())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn settle(&mut self, key: &RequestKey) -> bool {
        match self.pending.iter().position(|pending| pending == key) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}
