use serde_json::Value;

use super::RoutePath;

/// One slot in the session history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: RoutePath,
    /// Payload handed over by whoever navigated here.
    pub state: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Back,
    Forward,
}

/// Raised when the session history is traversed rather than pushed to.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEvent {
    pub path: RoutePath,
    pub state: Option<Value>,
    pub traversal: Traversal,
}

/// The back/forward stack. Only the dispatcher holds one, so pushing a route
/// without first recording scroll is not possible from outside this module.
#[derive(Debug)]
pub(super) struct SessionHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    pub(super) fn new(initial: RoutePath) -> Self {
        Self {
            entries: vec![HistoryEntry {
                path: initial,
                state: None,
            }],
            index: 0,
        }
    }

    pub(super) fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// Add an entry after the current one, discarding anything forward of it.
    pub(super) fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index = self.entries.len() - 1;
    }

    pub(super) fn replace(&mut self, entry: HistoryEntry) {
        self.entries[self.index] = entry;
    }

    pub(super) fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub(super) fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub(super) fn traverse(&mut self, traversal: Traversal) -> Option<HistoryEvent> {
        match traversal {
            Traversal::Back if self.can_go_back() => self.index -= 1,
            Traversal::Forward if self.can_go_forward() => self.index += 1,
            _ => return None,
        }

        let entry = self.current();
        Some(HistoryEvent {
            path: entry.path.clone(),
            state: entry.state.clone(),
            traversal,
        })
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
