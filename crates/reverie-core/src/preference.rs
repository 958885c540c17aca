//! Preference repository trait.
//!
//! Preferences are the small pieces of state that outlive a session: favorite
//! themes, unlocked secret themes, user-generated themes and the preferred
//! reflection mode.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::ReflectionMode;
use crate::theme::Theme;

/// Repository for durable user preferences.
///
/// Getters never fail: a missing or corrupt value yields an empty default and
/// the implementation logs the problem. Setters write the whole value.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn get_favorite_theme_ids(&self) -> Vec<String>;

    async fn set_favorite_theme_ids(&self, ids: Vec<String>) -> Result<()>;

    /// Unlocked secret themes are stored by id only.
    async fn get_unlocked_theme_ids(&self) -> Vec<String>;

    async fn set_unlocked_theme_ids(&self, ids: Vec<String>) -> Result<()>;

    /// Custom themes are stored as full objects.
    async fn get_custom_themes(&self) -> Vec<Theme>;

    async fn set_custom_themes(&self, themes: Vec<Theme>) -> Result<()>;

    async fn get_reflection_mode(&self) -> ReflectionMode;

    async fn set_reflection_mode(&self, mode: ReflectionMode) -> Result<()>;
}
