use serde_json::Value;

use super::history::{HistoryEntry, HistoryEvent, SessionHistory, Traversal};
use super::{RoutePath, ScrollPosition, ScrollPositionCache};

/// Options passed through untouched to the route transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// Payload for the destination view.
    pub state: Option<Value>,
}

impl NavigateOptions {
    pub fn with_state(state: Value) -> Self {
        Self {
            replace: false,
            state: Some(state),
        }
    }
}

/// The only way to move between routes.
///
/// `navigate` records the outgoing view's offset and then changes the route,
/// in that order and within the same call. The session history is private, so
/// nothing can change routes without passing through here.
#[derive(Debug)]
pub struct NavigationDispatcher {
    cache: ScrollPositionCache,
    history: SessionHistory,
}

impl NavigationDispatcher {
    pub fn new(cache: ScrollPositionCache, initial: impl Into<RoutePath>) -> Self {
        Self {
            cache,
            history: SessionHistory::new(initial.into()),
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        self.history.current()
    }

    pub fn current_path(&self) -> &RoutePath {
        &self.history.current().path
    }

    pub fn cache(&self) -> &ScrollPositionCache {
        &self.cache
    }

    /// Checkpoint `viewport`'s offset under the current path, then move to
    /// `target`.
    pub fn navigate<V>(
        &mut self,
        viewport: &V,
        target: impl Into<RoutePath>,
        options: NavigateOptions,
    ) -> &HistoryEntry
    where
        V: ScrollPosition + ?Sized,
    {
        let target = target.into();
        let from = self.current_path().clone();
        let offset = viewport.scroll_offset();
        self.cache.save(&from, offset);

        let entry = HistoryEntry {
            path: target,
            state: options.state,
        };
        tracing::info!(
            from = %from,
            to = %entry.path,
            offset,
            replace = options.replace,
            "navigate"
        );
        match options.replace {
            true => self.history.replace(entry),
            false => self.history.push(entry),
        }
        self.history.current()
    }

    /// Step back in the session history. Scroll is not recorded: the
    /// offset saved when the destination was left is the one to restore.
    pub fn go_back(&mut self) -> Option<HistoryEvent> {
        self.traverse(Traversal::Back)
    }

    pub fn go_forward(&mut self) -> Option<HistoryEvent> {
        self.traverse(Traversal::Forward)
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn traverse(&mut self, traversal: Traversal) -> Option<HistoryEvent> {
        let event = self.history.traverse(traversal);
        match &event {
            Some(event) => tracing::info!(to = %event.path, ?traversal, "history.traverse"),
            None => tracing::debug!(?traversal, "history.traverse at edge"),
        }
        event
    }
}
