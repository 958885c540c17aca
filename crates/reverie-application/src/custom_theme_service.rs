//! Custom Theme Service
//!
//! Turns a free-text description into a new theme via a [`ThemeDesigner`]
//! and registers it as a custom theme.

use reverie_core::error::{ReverieError, Result};
use reverie_core::studio::ThemeDesigner;
use reverie_core::theme::{Theme, ThemeRegistry, ThemeSource};
use std::sync::Arc;

/// Service for creating user-described themes
pub struct CustomThemeService {
    registry: Arc<ThemeRegistry>,
    designer: Arc<dyn ThemeDesigner>,
}

impl CustomThemeService {
    pub fn new(registry: Arc<ThemeRegistry>, designer: Arc<dyn ThemeDesigner>) -> Self {
        Self { registry, designer }
    }

    /// Designs a theme from `prompt` and adds it to the registry.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Theme))` - The registered theme, with a unique id
    /// * `Ok(None)` - The designer could not produce a theme
    /// * `Err` - Blank prompt, or the designer failed
    pub async fn create_theme(&self, prompt: &str) -> Result<Option<Theme>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ReverieError::invalid_input("Describe the theme you want"));
        }

        let Some(designed) = self.designer.design_theme(prompt).await? else {
            tracing::info!("[CustomThemeService] Designer returned no theme for prompt");
            return Ok(None);
        };

        if designed.visual_prompt.trim().is_empty() {
            return Err(ReverieError::generation(
                "Designed theme has no visual prompt",
            ));
        }

        let base_id = if designed.id.trim().is_empty() {
            format!("custom-{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
        } else {
            designed.id.trim().to_string()
        };
        let display_name = if designed.display_name.trim().is_empty() {
            prompt.to_string()
        } else {
            designed.display_name.trim().to_string()
        };
        let short_name = if designed.short_name.trim().is_empty() {
            display_name.clone()
        } else {
            designed.short_name.trim().to_string()
        };

        let theme = Theme {
            id: self.unique_id(&base_id),
            display_name,
            short_name,
            source: ThemeSource::Custom,
            ..designed
        };

        self.registry.add_custom_theme(theme.clone()).await;
        tracing::info!(
            "[CustomThemeService] Created custom theme {} ({})",
            theme.id,
            theme.display_name
        );
        Ok(Some(theme))
    }

    /// Suffixes `base` with `-2`, `-3`, ... until no registered theme uses it.
    fn unique_id(&self, base: &str) -> String {
        if !self.registry.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.registry.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reverie_core::theme::ThemeStyle;
    use reverie_infrastructure::PreferenceRepositoryImpl;

    struct FixedDesigner {
        theme: Option<Theme>,
    }

    #[async_trait]
    impl ThemeDesigner for FixedDesigner {
        async fn design_theme(&self, _prompt: &str) -> Result<Option<Theme>> {
            Ok(self.theme.clone())
        }
    }

    struct FailingDesigner;

    #[async_trait]
    impl ThemeDesigner for FailingDesigner {
        async fn design_theme(&self, _prompt: &str) -> Result<Option<Theme>> {
            Err(ReverieError::generation("designer offline"))
        }
    }

    fn designed(id: &str) -> Theme {
        Theme {
            id: id.to_string(),
            display_name: "Harbor Blues".to_string(),
            short_name: String::new(),
            narrative_template: "You are a sailor.".to_string(),
            visual_prompt: "A blue harbor of {{ tags }}".to_string(),
            style: ThemeStyle::default(),
            loading_messages: Vec::new(),
            disable_narrative: false,
            use_poem_for_image_generation: false,
            source: ThemeSource::BuiltIn,
        }
    }

    fn service(designer: impl ThemeDesigner + 'static) -> (CustomThemeService, Arc<ThemeRegistry>) {
        let preferences = Arc::new(PreferenceRepositoryImpl::in_memory());
        let registry = Arc::new(ThemeRegistry::new(preferences));
        (
            CustomThemeService::new(registry.clone(), Arc::new(designer)),
            registry,
        )
    }

    #[tokio::test]
    async fn test_create_theme_registers_custom_theme() {
        let (service, registry) = service(FixedDesigner {
            theme: Some(designed("custom-harbor-blues")),
        });

        let theme = service.create_theme("harbor blues").await.unwrap().unwrap();

        assert_eq!(theme.id, "custom-harbor-blues");
        assert_eq!(theme.source, ThemeSource::Custom);
        assert_eq!(theme.short_name, "Harbor Blues");
        assert_eq!(registry.custom_themes(), vec![theme.clone()]);
        assert!(registry.contains("custom-harbor-blues"));
    }

    #[tokio::test]
    async fn test_create_theme_makes_ids_unique() {
        let (service, _registry) = service(FixedDesigner {
            theme: Some(designed("golden-hour")),
        });

        let first = service.create_theme("gold").await.unwrap().unwrap();
        let second = service.create_theme("gold").await.unwrap().unwrap();

        assert_eq!(first.id, "golden-hour-2");
        assert_eq!(second.id, "golden-hour-3");
    }

    #[tokio::test]
    async fn test_create_theme_without_id_gets_generated_one() {
        let (service, _registry) = service(FixedDesigner {
            theme: Some(designed("")),
        });

        let theme = service.create_theme("harbor").await.unwrap().unwrap();
        assert!(theme.id.starts_with("custom-"));
        assert_eq!(theme.id.len(), "custom-".len() + 8);
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected() {
        let (service, registry) = service(FixedDesigner {
            theme: Some(designed("custom-x")),
        });

        let err = service.create_theme("   ").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(registry.custom_themes().is_empty());
    }

    #[tokio::test]
    async fn test_designer_without_result_adds_nothing() {
        let (service, registry) = service(FixedDesigner { theme: None });

        assert!(service.create_theme("anything").await.unwrap().is_none());
        assert!(registry.custom_themes().is_empty());
    }

    #[tokio::test]
    async fn test_designer_failure_is_propagated() {
        let (service, registry) = service(FailingDesigner);

        let err = service.create_theme("storm").await.unwrap_err();
        assert!(err.is_pipeline_failure());
        assert!(registry.custom_themes().is_empty());
    }
}
