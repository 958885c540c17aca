use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use reverie_core::artifact::{Artifact, ArtifactCache, CachePolicy};

/// In-memory cache of the last artifact produced for each theme.
///
/// Entries are kept in recency order (oldest first) so that the LRU policy
/// can evict from the front. Lookups never suspend, which keeps theme
/// switches instant.
pub struct InMemoryArtifactCache {
    entries: Mutex<IndexMap<String, Artifact>>,
    policy: CachePolicy,
}

impl InMemoryArtifactCache {
    /// Creates an empty cache with the unbounded policy.
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::Unbounded)
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            policy,
        }
    }

    fn entries(&self) -> MutexGuard<'_, IndexMap<String, Artifact>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn capacity(&self) -> Option<usize> {
        match self.policy {
            CachePolicy::Unbounded => None,
            // A zero capacity would evict the entry that was just written
            CachePolicy::Lru { capacity } => Some(capacity.max(1)),
        }
    }
}

impl Default for InMemoryArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactCache for InMemoryArtifactCache {
    fn get(&self, theme_id: &str) -> Option<Artifact> {
        let mut entries = self.entries();
        let index = entries.get_index_of(theme_id)?;
        if self.capacity().is_some() {
            let last = entries.len() - 1;
            entries.move_index(index, last);
            return entries.get_index(last).map(|(_, artifact)| artifact.clone());
        }
        entries.get_index(index).map(|(_, artifact)| artifact.clone())
    }

    fn set(&self, theme_id: &str, artifact: Artifact) {
        let mut entries = self.entries();
        entries.shift_remove(theme_id);
        entries.insert(theme_id.to_string(), artifact);

        if let Some(capacity) = self.capacity() {
            while entries.len() > capacity {
                if let Some((evicted, _)) = entries.shift_remove_index(0) {
                    tracing::debug!("[ArtifactCache] Evicted artifact for theme {}", evicted);
                }
            }
        }
    }

    fn clear(&self) {
        let mut entries = self.entries();
        tracing::debug!("[ArtifactCache] Clearing {} artifact(s)", entries.len());
        entries.clear();
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Checks membership without refreshing recency.
    fn contains(&self, theme_id: &str) -> bool {
        self.entries().contains_key(theme_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(theme_id: &str, image: &str) -> Artifact {
        Artifact::new(theme_id, image, "poem", "prompt", "v1")
    }

    #[test]
    fn test_set_overwrites_single_entry_per_theme() {
        let cache = InMemoryArtifactCache::new();
        cache.set("golden-hour", artifact("golden-hour", "img-1"));
        cache.set("golden-hour", artifact("golden-hour", "img-2"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("golden-hour").unwrap().image_url, "img-2");
    }

    #[test]
    fn test_unbounded_keeps_every_theme() {
        let cache = InMemoryArtifactCache::default();
        for id in ["a", "b", "c", "d"] {
            cache.set(id, artifact(id, id));
        }
        assert_eq!(cache.len(), 4);
        assert!(cache.contains("a"));
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let cache = InMemoryArtifactCache::with_policy(CachePolicy::Lru { capacity: 2 });
        cache.set("a", artifact("a", "1"));
        cache.set("b", artifact("b", "2"));

        // Reading "a" makes "b" the oldest entry
        assert!(cache.get("a").is_some());
        cache.set("c", artifact("c", "3"));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_lru_zero_capacity_still_holds_latest() {
        let cache = InMemoryArtifactCache::with_policy(CachePolicy::Lru { capacity: 0 });
        cache.set("a", artifact("a", "1"));
        cache.set("b", artifact("b", "2"));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("b"));
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = InMemoryArtifactCache::new();
        cache.set("a", artifact("a", "1"));
        cache.set("b", artifact("b", "2"));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}
