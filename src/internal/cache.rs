use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct Slot<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory response cache with a fixed time-to-live.
///
/// Clones share storage, so an `ApiService` handed to a spawned task writes
/// into the same cache the UI thread reads. With `enable_metrics` each call
/// emits a `tracing` debug event with its hit/miss outcome.
pub struct Cache<K, V> {
    slots: Arc<RwLock<HashMap<K, Slot<V>>>>,
    ttl: Duration,
    enable_metrics: bool,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_metrics(ttl, false)
    }

    pub fn with_metrics(ttl: Duration, enable_metrics: bool) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            enable_metrics,
        }
    }

    /// A clone of the stored value, unless missing or older than the TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let slots = self.slots.read().ok()?;
        let value = slots
            .get(key)
            .filter(|slot| slot.stored_at.elapsed() < self.ttl)
            .map(|slot| slot.value.clone());

        if self.enable_metrics {
            tracing::debug!(hit = value.is_some(), "response_cache.get");
        }
        value
    }

    pub fn set(&self, key: K, value: V) {
        let Ok(mut slots) = self.slots.write() else {
            tracing::warn!("response_cache.set skipped (lock poisoned)");
            return;
        };
        slots.insert(
            key,
            Slot {
                value,
                stored_at: Instant::now(),
            },
        );
        if self.enable_metrics {
            tracing::debug!(entries = slots.len(), "response_cache.set");
        }
    }

    pub fn invalidate(&self, key: &K) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
            if self.enable_metrics {
                tracing::debug!(entries = slots.len(), "response_cache.invalidate");
            }
        }
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            ttl: self.ttl,
            enable_metrics: self.enable_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn stores_and_returns_values() {
        let cache = Cache::new(Duration::from_secs(60));
        cache.set("sports", vec![1, 2, 3]);

        assert_eq!(cache.get(&"sports"), Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&"opinion"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = Cache::new(Duration::from_millis(50));
        cache.set(1u64, "headline".to_string());
        assert!(cache.get(&1).is_some());

        thread::sleep(Duration::from_millis(80));

        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn invalidate_removes_one_key() {
        let cache = Cache::new(Duration::from_secs(60));
        cache.set(1u64, "a".to_string());
        cache.set(2u64, "b".to_string());

        cache.invalidate(&1);

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some("b".to_string()));
    }

    #[test]
    fn clones_share_storage() {
        let cache = Cache::new(Duration::from_secs(60));
        let other = cache.clone();
        other.set(7u64, "shared".to_string());

        assert_eq!(cache.get(&7), Some("shared".to_string()));
    }
}
