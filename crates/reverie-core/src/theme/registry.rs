//! Theme registry.
//!
//! Holds the built-in, unlocked and custom themes and exposes them as one
//! merged, deduplicated view with favorites floated to the front.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex as AsyncMutex;

use super::model::{Theme, ThemeSource};
use super::preset::{find_secret_by_code, find_secret_by_id, get_builtin_themes};
use crate::preference::PreferenceRepository;

#[derive(Debug, Default)]
struct ThemeCatalog {
    unlocked: Vec<Theme>,
    custom: Vec<Theme>,
    /// Ordered by the time each id was favorited.
    favorites: Vec<String>,
}

/// Registry of every theme available to the user.
///
/// Reads are synchronous so that theme switches never wait on I/O. Mutations
/// update the in-memory catalog first and then persist through the
/// [`PreferenceRepository`]; persistence failures are logged and ignored.
pub struct ThemeRegistry {
    builtins: Vec<Theme>,
    catalog: RwLock<ThemeCatalog>,
    preferences: Arc<dyn PreferenceRepository>,
    /// Held from snapshot to write so saves land in mutation order.
    persist: AsyncMutex<()>,
}

impl ThemeRegistry {
    /// Creates a registry over the shipped built-in themes.
    pub fn new(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self::with_builtins(get_builtin_themes(), preferences)
    }

    /// Creates a registry over a custom set of built-in themes.
    pub fn with_builtins(builtins: Vec<Theme>, preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self {
            builtins,
            catalog: RwLock::new(ThemeCatalog::default()),
            preferences,
            persist: AsyncMutex::new(()),
        }
    }

    /// Restores favorites, unlocked themes and custom themes from storage.
    ///
    /// Unlocked ids are rehydrated against the secret theme table; ids that
    /// no longer exist there are dropped.
    pub async fn restore(&self) {
        let favorites = self.preferences.get_favorite_theme_ids().await;
        let unlocked_ids = self.preferences.get_unlocked_theme_ids().await;
        let custom = self.preferences.get_custom_themes().await;

        let mut unlocked: Vec<Theme> = Vec::new();
        for id in unlocked_ids {
            match find_secret_by_id(&id) {
                Some(theme) if !unlocked.iter().any(|t| t.id == theme.id) => unlocked.push(theme),
                Some(_) => {}
                None => tracing::warn!("[ThemeRegistry] Dropping unknown unlocked theme id: {}", id),
            }
        }

        tracing::info!(
            "[ThemeRegistry] Restored {} favorite(s), {} unlocked, {} custom theme(s)",
            favorites.len(),
            unlocked.len(),
            custom.len()
        );

        let mut catalog = self.write();
        catalog.favorites = favorites;
        catalog.unlocked = unlocked;
        catalog.custom = custom;
    }

    /// Returns built-ins, unlocked and custom themes, deduplicated by id
    /// (first seen wins), with favorites first in the order they were
    /// favorited. Non-favorites keep their relative order.
    pub fn all_themes(&self) -> Vec<Theme> {
        let catalog = self.read();

        let mut merged: Vec<Theme> = Vec::new();
        for theme in self
            .builtins
            .iter()
            .chain(catalog.unlocked.iter())
            .chain(catalog.custom.iter())
        {
            if !merged.iter().any(|existing| existing.id == theme.id) {
                merged.push(theme.clone());
            }
        }

        // sort_by_key is stable, so non-favorites keep insertion order
        merged.sort_by_key(|theme| {
            catalog
                .favorites
                .iter()
                .position(|id| id == &theme.id)
                .unwrap_or(usize::MAX)
        });
        merged
    }

    /// Looks up a theme by id.
    pub fn get_theme(&self, id: &str) -> Option<Theme> {
        let catalog = self.read();
        self.builtins
            .iter()
            .chain(catalog.unlocked.iter())
            .chain(catalog.custom.iter())
            .find(|theme| theme.id == id)
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_theme(id).is_some()
    }

    /// Adds a secret theme to the unlocked set.
    ///
    /// Returns `true` if the theme was newly unlocked, `false` if it was
    /// already unlocked or is not a known secret theme.
    pub async fn unlock_theme(&self, theme: Theme) -> bool {
        if find_secret_by_id(&theme.id).is_none() {
            tracing::debug!("[ThemeRegistry] Refusing to unlock unknown theme: {}", theme.id);
            return false;
        }

        let _persist = self.persist.lock().await;
        let ids = {
            let mut catalog = self.write();
            if catalog.unlocked.iter().any(|t| t.id == theme.id) {
                return false;
            }
            catalog.unlocked.push(Theme {
                source: ThemeSource::Secret,
                ..theme
            });
            catalog
                .unlocked
                .iter()
                .map(|t| t.id.clone())
                .collect::<Vec<_>>()
        };

        if let Err(e) = self.preferences.set_unlocked_theme_ids(ids).await {
            tracing::warn!("[ThemeRegistry] Failed to persist unlocked themes: {}", e);
        }
        true
    }

    /// Unlocks the secret theme matching `code`.
    ///
    /// Returns the theme for any valid code, whether or not it was already
    /// unlocked.
    pub async fn unlock_with_code(&self, code: &str) -> Option<Theme> {
        let theme = find_secret_by_code(code)?;
        if self.unlock_theme(theme.clone()).await {
            tracing::info!("[ThemeRegistry] Unlocked secret theme: {}", theme.id);
        }
        Some(theme)
    }

    /// Appends a user-generated theme and persists the full custom set.
    ///
    /// Id uniqueness is the caller's responsibility.
    pub async fn add_custom_theme(&self, theme: Theme) {
        let _persist = self.persist.lock().await;
        let custom = {
            let mut catalog = self.write();
            catalog.custom.push(Theme {
                source: ThemeSource::Custom,
                ..theme
            });
            catalog.custom.clone()
        };

        if let Err(e) = self.preferences.set_custom_themes(custom).await {
            tracing::warn!("[ThemeRegistry] Failed to persist custom themes: {}", e);
        }
    }

    /// Flips favorite membership for `id` and returns the new membership.
    ///
    /// Works for any id, whether or not a theme with that id exists.
    pub async fn toggle_favorite(&self, id: &str) -> bool {
        let _persist = self.persist.lock().await;
        let (is_favorite, favorites) = {
            let mut catalog = self.write();
            let is_favorite = match catalog.favorites.iter().position(|f| f == id) {
                Some(index) => {
                    catalog.favorites.remove(index);
                    false
                }
                None => {
                    catalog.favorites.push(id.to_string());
                    true
                }
            };
            (is_favorite, catalog.favorites.clone())
        };

        if let Err(e) = self.preferences.set_favorite_theme_ids(favorites).await {
            tracing::warn!("[ThemeRegistry] Failed to persist favorites: {}", e);
        }
        is_favorite
    }

    pub fn favorites(&self) -> Vec<String> {
        self.read().favorites.clone()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.read().favorites.iter().any(|f| f == id)
    }

    pub fn unlocked_themes(&self) -> Vec<Theme> {
        self.read().unlocked.clone()
    }

    pub fn custom_themes(&self) -> Vec<Theme> {
        self.read().custom.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, ThemeCatalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ThemeCatalog> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }
}
