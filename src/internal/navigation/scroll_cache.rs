use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{RoutePath, ScrollOffset};

/// Last known scroll offset per route.
///
/// One instance is created by the application shell and cloned into the
/// dispatcher and the restoration listener; clones share the same map.
/// Entries live for the process lifetime and are never written to disk.
#[derive(Debug, Clone, Default)]
pub struct ScrollPositionCache {
    positions: Arc<RwLock<HashMap<RoutePath, ScrollOffset>>>,
}

impl ScrollPositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `offset` for `path`, replacing any earlier value.
    pub fn save(&self, path: &RoutePath, offset: ScrollOffset) {
        match self.positions.write() {
            Ok(mut positions) => {
                positions.insert(path.clone(), offset);
                tracing::debug!(path = %path, offset, "scroll_cache.save");
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(path.clone(), offset);
                tracing::warn!(path = %path, offset, "scroll_cache.save recovered poisoned lock");
            }
        }
    }

    /// The stored offset for `path`, or 0 (top) when nothing was recorded.
    pub fn get(&self, path: &RoutePath) -> ScrollOffset {
        let offset = match self.positions.read() {
            Ok(positions) => positions.get(path).copied(),
            Err(poisoned) => poisoned.into_inner().get(path).copied(),
        };
        tracing::trace!(path = %path, hit = offset.is_some(), "scroll_cache.get");
        offset.unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.positions.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_reads_as_top() {
        let cache = ScrollPositionCache::new();
        assert_eq!(cache.get(&RoutePath::new("/sports")), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let cache = ScrollPositionCache::new();
        let path = RoutePath::new("/business");

        cache.save(&path, 40);
        cache.save(&path, 12);

        assert_eq!(cache.get(&path), 12);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let cache = ScrollPositionCache::new();
        let shared = cache.clone();

        cache.save(&RoutePath::new("/"), 7);
        assert_eq!(shared.get(&RoutePath::new("/")), 7);
    }

    #[test]
    fn query_string_does_not_split_entries() {
        let cache = ScrollPositionCache::new();
        cache.save(&RoutePath::new("/national?page=2"), 9);
        assert_eq!(cache.get(&RoutePath::new("/national")), 9);
    }
}
