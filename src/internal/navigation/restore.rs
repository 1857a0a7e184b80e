use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::{HistoryEvent, RoutePath, ScrollOffset, ScrollPositionCache};

/// Scroll effect emitted once a traversal has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRestore {
    pub path: RoutePath,
    pub offset: ScrollOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreState {
    Idle,
    Settling,
}

/// Listens for back/forward traversals and restores the saved offset after a
/// settle delay, giving the destination view time to load its content.
///
/// At most one restoration is in flight: a new traversal aborts the pending
/// one. The effect is delivered as `M::from(ScrollRestore)` on `tx`.
pub struct ScrollRestorer<M> {
    cache: ScrollPositionCache,
    settle_delay: Duration,
    tx: UnboundedSender<M>,
    pending: Option<JoinHandle<()>>,
}

impl<M> ScrollRestorer<M>
where
    M: From<ScrollRestore> + Send + 'static,
{
    pub fn new(cache: ScrollPositionCache, settle_delay: Duration, tx: UnboundedSender<M>) -> Self {
        Self {
            cache,
            settle_delay,
            tx,
            pending: None,
        }
    }

    /// Schedule restoration for the traversal's destination. Must be called
    /// from within a tokio runtime.
    pub fn on_history_event(&mut self, event: &HistoryEvent) {
        self.cancel();

        let cache = self.cache.clone();
        let tx = self.tx.clone();
        let path = event.path.clone();
        let delay = self.settle_delay;
        tracing::debug!(path = %path, ?delay, "scroll_restore.scheduled");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let offset = cache.get(&path);
            if offset == 0 {
                tracing::debug!(path = %path, "scroll_restore.none_saved");
                return;
            }
            tracing::debug!(path = %path, offset, "scroll_restore.apply");
            if tx.send(M::from(ScrollRestore { path, offset })).is_err() {
                tracing::debug!("scroll_restore receiver dropped");
            }
        }));
    }
}

impl<M> ScrollRestorer<M> {
    pub fn state(&self) -> RestoreState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => RestoreState::Settling,
            _ => RestoreState::Idle,
        }
    }

    /// Abort the pending restoration, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take()
            && !handle.is_finished()
        {
            handle.abort();
            tracing::debug!("scroll_restore.cancelled");
        }
    }
}

impl<M> Drop for ScrollRestorer<M> {
    fn drop(&mut self) {
        self.cancel();
    }
}
