//! Key-value stores backing user preferences.
//!
//! Values are opaque strings; callers decide their encoding.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use reverie_core::error::Result;

use super::toml_document::TomlDocument;
use crate::dto::PreferencesFileDto;

/// Blocking whole-value key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores every key in a single `preferences.toml` file.
pub struct TomlKeyValueStore {
    file: TomlDocument<PreferencesFileDto>,
}

impl TomlKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: TomlDocument::new(path),
        }
    }
}

impl KeyValueStore for TomlKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.file.load()?;
        Ok(data.and_then(|mut dto| dto.values.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(PreferencesFileDto::default(), |dto| {
            dto.values.insert(key.to_string(), value.to_string());
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file.update(PreferencesFileDto::default(), |dto| {
            dto.values.remove(key);
        })?;
        Ok(())
    }
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toml_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");

        let store = TomlKeyValueStore::new(path.clone());
        assert_eq!(store.get("favorite_theme_ids").unwrap(), None);
        store.set("favorite_theme_ids", r#"["ink-wash"]"#).unwrap();
        store.set("reflection_mode", r#""visual""#).unwrap();

        let reopened = TomlKeyValueStore::new(path);
        assert_eq!(
            reopened.get("favorite_theme_ids").unwrap().as_deref(),
            Some(r#"["ink-wash"]"#)
        );

        reopened.remove("favorite_theme_ids").unwrap();
        assert_eq!(reopened.get("favorite_theme_ids").unwrap(), None);
        assert!(reopened.get("reflection_mode").unwrap().is_some());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
