//! Configuration service.
//!
//! Loads [`StudioConfig`] from `config.toml` and caches it. A missing file
//! yields defaults; an unreadable file is logged and also yields defaults.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use reverie_core::config::StudioConfig;
use reverie_core::error::Result;

use crate::paths::ReveriePaths;
use crate::storage::TomlDocument;

#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<StudioConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &ReveriePaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    pub fn get_config(&self) -> StudioConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load_config();
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        loaded
    }

    /// Writes `config` to disk and replaces the cached copy.
    pub fn save_config(&self, config: &StudioConfig) -> Result<()> {
        TomlDocument::<StudioConfig>::new(self.path.clone()).save(config)?;
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(config.clone());
        Ok(())
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }

    fn load_config(&self) -> StudioConfig {
        match TomlDocument::<StudioConfig>::new(self.path.clone()).load() {
            Ok(Some(config)) => {
                tracing::debug!("[ConfigService] Loaded {}", self.path.display());
                config
            }
            Ok(None) => StudioConfig::default(),
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Failed to load {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                StudioConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::artifact::CachePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(&ReveriePaths::new(Some(temp_dir.path()))).unwrap();
        assert_eq!(service.get_config(), StudioConfig::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "parallel_generation = \"maybe\"").unwrap();

        let service = ConfigService::with_path(path);
        assert!(service.get_config().parallel_generation);
    }

    #[test]
    fn test_save_then_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let config = StudioConfig {
            cache_policy: CachePolicy::Lru { capacity: 4 },
            parallel_generation: false,
            default_theme_id: Some("ink-wash".to_string()),
        };
        service.save_config(&config).unwrap();

        let fresh = ConfigService::with_path(path);
        assert_eq!(fresh.get_config(), config);
    }

    #[test]
    fn test_invalidate_cache_picks_up_external_edits() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        assert!(service.get_config().parallel_generation);

        std::fs::write(&path, "parallel_generation = false\n").unwrap();
        assert!(service.get_config().parallel_generation);

        service.invalidate_cache();
        assert!(!service.get_config().parallel_generation);
    }
}
