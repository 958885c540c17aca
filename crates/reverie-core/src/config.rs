//! Studio configuration model.

use serde::{Deserialize, Serialize};

use crate::artifact::CachePolicy;

/// Tunables for the session orchestrator, loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Eviction policy of the per-session artifact cache
    #[serde(default)]
    pub cache_policy: CachePolicy,
    /// Start image generation while the poem dialogue is still running
    #[serde(default = "default_parallel_generation")]
    pub parallel_generation: bool,
    /// Theme selected when no other theme is requested
    #[serde(default)]
    pub default_theme_id: Option<String>,
}

fn default_parallel_generation() -> bool {
    true
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            cache_policy: CachePolicy::default(),
            parallel_generation: default_parallel_generation(),
            default_theme_id: None,
        }
    }
}
