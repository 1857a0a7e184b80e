//! Route changes and the scroll positions that travel with them.
//!
//! Outgoing navigation goes through [`NavigationDispatcher`], which checkpoints
//! the current scroll offset into the shared [`ScrollPositionCache`] before the
//! session history moves. Back/forward traversal produces a [`HistoryEvent`]
//! that the [`ScrollRestorer`] turns into a delayed scroll effect.

mod dispatcher;
mod history;
mod restore;
mod route;
mod scroll_cache;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use dispatcher::{NavigateOptions, NavigationDispatcher};
pub use history::{HistoryEntry, HistoryEvent, Traversal};
pub use restore::{RestoreState, ScrollRestore, ScrollRestorer};
pub use route::Route;
pub use scroll_cache::ScrollPositionCache;

use crate::utils::url::logical_path;

/// Rows from the top of a view.
pub type ScrollOffset = u32;

/// Logical page identifier. Never carries a query string or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoutePath(String);

impl RoutePath {
    pub fn new(location: impl AsRef<str>) -> Self {
        Self(logical_path(location.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoutePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Something whose current vertical offset can be read, e.g. the list or
/// article view that is about to be navigated away from.
pub trait ScrollPosition {
    fn scroll_offset(&self) -> ScrollOffset;
}

impl ScrollPosition for ScrollOffset {
    fn scroll_offset(&self) -> ScrollOffset {
        *self
    }
}
