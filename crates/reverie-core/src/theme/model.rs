//! Theme domain model.
//!
//! A theme bundles the narrative persona used when analyzing a photo with the
//! visual style used when stylizing it.

use serde::{Deserialize, Serialize};

/// Where a theme came from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSource {
    /// Shipped with the application
    #[default]
    BuiltIn,
    /// Hidden behind an unlock code
    Secret,
    /// Generated from a user prompt
    Custom,
}

/// Colors and typography applied to a postcard rendered with this theme.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeStyle {
    pub primary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub font_family: String,
}

/// A named bundle of narrative and visual configuration.
///
/// Themes are immutable once created. `visual_prompt` is a template rendered
/// by the prompt composer with the photo's visual tags (and optionally the
/// finished poem).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Unique identifier
    pub id: String,
    /// Full display name (e.g., "Golden Hour Letters")
    pub display_name: String,
    /// Short label used on compact controls
    pub short_name: String,
    /// Persona and instructions for the poem writer
    pub narrative_template: String,
    /// Template for the image generation prompt
    pub visual_prompt: String,
    /// Style tokens
    #[serde(default)]
    pub style: ThemeStyle,
    /// Messages cycled while the pipeline is running
    #[serde(default)]
    pub loading_messages: Vec<String>,
    /// Skip the interactive poem dialogue for this theme
    #[serde(default)]
    pub disable_narrative: bool,
    /// Feed the finished poem into the image prompt
    #[serde(default)]
    pub use_poem_for_image_generation: bool,
    #[serde(default)]
    pub source: ThemeSource,
}

impl Theme {
    /// Whether image generation for this theme can start before the poem is
    /// finished.
    pub fn allows_parallel_generation(&self) -> bool {
        !self.use_poem_for_image_generation && !self.disable_narrative
    }
}
