//! Preference repository backed by a key-value store.
//!
//! Each preference is stored under its own key as a JSON string and is read
//! and written as a whole. Missing or unreadable values fall back to empty
//! defaults; the failure is logged and never surfaces to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use reverie_core::error::{ReverieError, Result};
use reverie_core::preference::PreferenceRepository;
use reverie_core::session::ReflectionMode;
use reverie_core::theme::Theme;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::ThemeDto;
use crate::paths::ReveriePaths;
use crate::storage::{KeyValueStore, MemoryKeyValueStore, TomlKeyValueStore};

pub const FAVORITE_THEME_IDS_KEY: &str = "favorite_theme_ids";
pub const UNLOCKED_THEME_IDS_KEY: &str = "unlocked_theme_ids";
pub const CUSTOM_THEMES_KEY: &str = "custom_themes";
pub const REFLECTION_MODE_KEY: &str = "reflection_mode";

#[derive(Clone)]
pub struct PreferenceRepositoryImpl {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceRepositoryImpl {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Opens the preferences file under the resolved config directory.
    pub fn open(paths: &ReveriePaths) -> Result<Self> {
        let path = paths.preferences_file()?;
        tracing::debug!("[PreferenceRepository] Using {}", path.display());
        Ok(Self::new(Arc::new(TomlKeyValueStore::new(path))))
    }

    /// Creates a repository that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    async fn read_value<T>(&self, key: &'static str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let store = self.store.clone();
        let raw = match tokio::task::spawn_blocking(move || store.get(key)).await {
            Ok(Ok(raw)) => raw?,
            Ok(Err(e)) => {
                tracing::warn!("[PreferenceRepository] Failed to read '{}': {}", key, e);
                return None;
            }
            Err(e) => {
                tracing::warn!("[PreferenceRepository] Read task for '{}' failed: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    "[PreferenceRepository] Ignoring corrupt value for '{}': {}",
                    key,
                    e
                );
                None
            }
        }
    }

    async fn write_value<T>(&self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.set(key, &json))
            .await
            .map_err(|e| ReverieError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl PreferenceRepository for PreferenceRepositoryImpl {
    async fn get_favorite_theme_ids(&self) -> Vec<String> {
        self.read_value(FAVORITE_THEME_IDS_KEY)
            .await
            .unwrap_or_default()
    }

    async fn set_favorite_theme_ids(&self, ids: Vec<String>) -> Result<()> {
        self.write_value(FAVORITE_THEME_IDS_KEY, &ids).await
    }

    async fn get_unlocked_theme_ids(&self) -> Vec<String> {
        self.read_value(UNLOCKED_THEME_IDS_KEY)
            .await
            .unwrap_or_default()
    }

    async fn set_unlocked_theme_ids(&self, ids: Vec<String>) -> Result<()> {
        self.write_value(UNLOCKED_THEME_IDS_KEY, &ids).await
    }

    async fn get_custom_themes(&self) -> Vec<Theme> {
        // Entries are decoded one by one so a single bad record does not
        // discard the rest.
        let records: Vec<serde_json::Value> = self
            .read_value(CUSTOM_THEMES_KEY)
            .await
            .unwrap_or_default();

        records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<ThemeDto>(record) {
                Ok(dto) => Some(dto.into_domain()),
                Err(e) => {
                    tracing::warn!("[PreferenceRepository] Skipping corrupt custom theme: {}", e);
                    None
                }
            })
            .collect()
    }

    async fn set_custom_themes(&self, themes: Vec<Theme>) -> Result<()> {
        let records: Vec<ThemeDto> = themes.iter().map(ThemeDto::from).collect();
        self.write_value(CUSTOM_THEMES_KEY, &records).await
    }

    async fn get_reflection_mode(&self) -> ReflectionMode {
        self.read_value(REFLECTION_MODE_KEY)
            .await
            .unwrap_or_default()
    }

    async fn set_reflection_mode(&self, mode: ReflectionMode) -> Result<()> {
        self.write_value(REFLECTION_MODE_KEY, &mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::theme::{ThemeSource, get_builtin_themes};
    use tempfile::TempDir;

    fn custom_theme(id: &str) -> Theme {
        let mut theme = get_builtin_themes().remove(0);
        theme.id = id.to_string();
        theme.source = ThemeSource::Custom;
        theme
    }

    #[tokio::test]
    async fn test_defaults_when_nothing_is_stored() {
        let repo = PreferenceRepositoryImpl::in_memory();
        assert!(repo.get_favorite_theme_ids().await.is_empty());
        assert!(repo.get_unlocked_theme_ids().await.is_empty());
        assert!(repo.get_custom_themes().await.is_empty());
        assert_eq!(repo.get_reflection_mode().await, ReflectionMode::Full);
    }

    #[tokio::test]
    async fn test_round_trip_through_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReveriePaths::new(Some(temp_dir.path()));

        {
            let repo = PreferenceRepositoryImpl::open(&paths).unwrap();
            repo.set_favorite_theme_ids(vec!["neon-noir".into(), "ink-wash".into()])
                .await
                .unwrap();
            repo.set_unlocked_theme_ids(vec!["cosmic-dust".into()])
                .await
                .unwrap();
            repo.set_custom_themes(vec![custom_theme("harbor")])
                .await
                .unwrap();
            repo.set_reflection_mode(ReflectionMode::Visual).await.unwrap();
        }

        let repo = PreferenceRepositoryImpl::open(&paths).unwrap();
        assert_eq!(repo.get_favorite_theme_ids().await, vec!["neon-noir", "ink-wash"]);
        assert_eq!(repo.get_unlocked_theme_ids().await, vec!["cosmic-dust"]);
        assert_eq!(repo.get_custom_themes().await, vec![custom_theme("harbor")]);
        assert_eq!(repo.get_reflection_mode().await, ReflectionMode::Visual);
    }

    #[tokio::test]
    async fn test_corrupt_values_fall_back_to_defaults() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(FAVORITE_THEME_IDS_KEY, "{not json").unwrap();
        store.set(REFLECTION_MODE_KEY, r#""sepia""#).unwrap();
        let repo = PreferenceRepositoryImpl::new(store);

        assert!(repo.get_favorite_theme_ids().await.is_empty());
        assert_eq!(repo.get_reflection_mode().await, ReflectionMode::Full);
    }

    #[tokio::test]
    async fn test_writes_recover_from_malformed_preferences_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReveriePaths::new(Some(temp_dir.path()));
        let file = paths.preferences_file().unwrap();
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, "this is [[[ not toml").unwrap();

        {
            let repo = PreferenceRepositoryImpl::open(&paths).unwrap();
            assert!(repo.get_favorite_theme_ids().await.is_empty());
            repo.set_favorite_theme_ids(vec!["neon-noir".into()])
                .await
                .unwrap();
        }

        let repo = PreferenceRepositoryImpl::open(&paths).unwrap();
        assert_eq!(repo.get_favorite_theme_ids().await, vec!["neon-noir"]);
    }

    #[tokio::test]
    async fn test_corrupt_custom_theme_is_skipped() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let good = serde_json::to_value(ThemeDto::from(&custom_theme("keep"))).unwrap();
        let records = serde_json::json!([good, {"id": "broken"}]);
        store.set(CUSTOM_THEMES_KEY, &records.to_string()).unwrap();
        let repo = PreferenceRepositoryImpl::new(store);

        let themes = repo.get_custom_themes().await;
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].id, "keep");
    }
}
