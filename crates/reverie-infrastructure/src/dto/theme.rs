//! Persisted form of user-generated themes.

use reverie_core::theme::{Theme, ThemeSource, ThemeStyle};
use serde::{Deserialize, Serialize};

/// Version 1.0.0 records predate the `source` field; they are always custom.
pub const THEME_SCHEMA_VERSION: &str = "1.1.0";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeStyleDto {
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDto {
    #[serde(default = "legacy_version")]
    pub version: String,
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub narrative_template: String,
    pub visual_prompt: String,
    #[serde(default)]
    pub style: ThemeStyleDto,
    #[serde(default)]
    pub loading_messages: Vec<String>,
    #[serde(default)]
    pub disable_narrative: bool,
    #[serde(default)]
    pub use_poem_for_image_generation: bool,
    #[serde(default)]
    pub source: Option<ThemeSource>,
}

fn legacy_version() -> String {
    "1.0.0".to_string()
}

impl From<&Theme> for ThemeDto {
    fn from(theme: &Theme) -> Self {
        Self {
            version: THEME_SCHEMA_VERSION.to_string(),
            id: theme.id.clone(),
            display_name: theme.display_name.clone(),
            short_name: theme.short_name.clone(),
            narrative_template: theme.narrative_template.clone(),
            visual_prompt: theme.visual_prompt.clone(),
            style: ThemeStyleDto {
                primary_color: theme.style.primary_color.clone(),
                accent_color: theme.style.accent_color.clone(),
                background_color: theme.style.background_color.clone(),
                font_family: theme.style.font_family.clone(),
            },
            loading_messages: theme.loading_messages.clone(),
            disable_narrative: theme.disable_narrative,
            use_poem_for_image_generation: theme.use_poem_for_image_generation,
            source: Some(theme.source),
        }
    }
}

impl ThemeDto {
    pub fn into_domain(self) -> Theme {
        let short_name = if self.short_name.is_empty() {
            self.display_name.clone()
        } else {
            self.short_name
        };

        Theme {
            id: self.id,
            display_name: self.display_name,
            short_name,
            narrative_template: self.narrative_template,
            visual_prompt: self.visual_prompt,
            style: ThemeStyle {
                primary_color: self.style.primary_color,
                accent_color: self.style.accent_color,
                background_color: self.style.background_color,
                font_family: self.style.font_family,
            },
            loading_messages: self.loading_messages,
            disable_narrative: self.disable_narrative,
            use_poem_for_image_generation: self.use_poem_for_image_generation,
            source: self.source.unwrap_or(ThemeSource::Custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_defaults_to_custom() {
        let json = r#"{
            "id": "harbor",
            "display_name": "Harbor Dusk",
            "visual_prompt": "a harbor at dusk, {{ tags }}"
        }"#;
        let dto: ThemeDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.version, "1.0.0");

        let theme = dto.into_domain();
        assert_eq!(theme.source, ThemeSource::Custom);
        assert_eq!(theme.short_name, "Harbor Dusk");
        assert!(!theme.disable_narrative);
    }

    #[test]
    fn test_current_record_keeps_every_field() {
        let mut theme = reverie_core::theme::get_builtin_themes().remove(1);
        theme.source = ThemeSource::Custom;
        let dto = ThemeDto::from(&theme);
        assert_eq!(dto.version, THEME_SCHEMA_VERSION);
        assert_eq!(dto.into_domain(), theme);
    }
}
