//! Artifact cache trait.

use serde::{Deserialize, Serialize};

use super::model::Artifact;

/// Eviction policy for an artifact cache.
///
/// `Unbounded` keeps one artifact for every theme visited in the session,
/// which is bounded in practice by the number of themes. `Lru` caps the
/// number of entries and evicts the least recently read or written theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachePolicy {
    #[default]
    Unbounded,
    Lru { capacity: usize },
}

/// Session-scoped store mapping a theme id to its last artifact.
///
/// All operations are synchronous so that a theme switch can restore an
/// artifact without suspending. Implementations hold at most one entry per
/// theme id and never expose their storage for iteration.
pub trait ArtifactCache: Send + Sync {
    fn get(&self, theme_id: &str) -> Option<Artifact>;

    /// Unconditionally overwrites the entry for `theme_id`.
    fn set(&self, theme_id: &str, artifact: Artifact);

    /// Drops every entry.
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, theme_id: &str) -> bool {
        self.get(theme_id).is_some()
    }
}
