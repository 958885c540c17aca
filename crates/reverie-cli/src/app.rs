//! Composition root: builds the services every command works with.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use reverie_application::{InMemoryArtifactCache, OrchestratorSettings, SessionOrchestrator};
use reverie_core::config::StudioConfig;
use reverie_core::theme::ThemeRegistry;
use reverie_infrastructure::{ConfigService, PreferenceRepositoryImpl, ReveriePaths};
use reverie_interaction::DryrunStudio;

pub struct App {
    pub config: StudioConfig,
    pub config_service: ConfigService,
    pub config_file: PathBuf,
    pub preferences: Arc<PreferenceRepositoryImpl>,
    pub registry: Arc<ThemeRegistry>,
}

impl App {
    pub async fn bootstrap(config_dir: Option<&Path>) -> Result<Self> {
        let paths = ReveriePaths::new(config_dir);
        let config_file = paths.config_file()?;
        let config_service = ConfigService::new(&paths)?;
        let config = config_service.get_config();

        let preferences = Arc::new(PreferenceRepositoryImpl::open(&paths)?);
        let registry = Arc::new(ThemeRegistry::new(preferences.clone()));
        registry.restore().await;

        tracing::debug!(
            "[Bootstrap] Loaded {} theme(s) from {}",
            registry.all_themes().len(),
            paths.config_dir()?.display()
        );

        Ok(Self {
            config,
            config_service,
            config_file,
            preferences,
            registry,
        })
    }

    /// Builds a session orchestrator backed by `studio` for every collaborator.
    pub fn orchestrator(&self, studio: Arc<DryrunStudio>) -> SessionOrchestrator {
        let cache = Arc::new(InMemoryArtifactCache::with_policy(self.config.cache_policy));
        SessionOrchestrator::new(
            self.registry.clone(),
            cache,
            studio.clone(),
            studio,
            self.preferences.clone(),
            OrchestratorSettings::from(&self.config),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::image::ImageData;
    use reverie_core::session::{ReflectionMode, SessionStage};
    use tempfile::TempDir;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[tokio::test]
    async fn test_bootstrap_with_empty_config_dir() {
        let dir = TempDir::new().unwrap();
        let app = App::bootstrap(Some(dir.path())).await.unwrap();

        assert_eq!(app.config, StudioConfig::default());
        assert!(app.registry.contains("golden-hour"));
        assert!(app.config_file.starts_with(dir.path()));
    }

    #[tokio::test]
    async fn test_preferences_survive_restart() {
        let dir = TempDir::new().unwrap();
        {
            let app = App::bootstrap(Some(dir.path())).await.unwrap();
            app.registry.toggle_favorite("neon-noir").await;
            assert!(app.registry.unlock_with_code("STARGAZER").await.is_some());
        }

        let app = App::bootstrap(Some(dir.path())).await.unwrap();
        assert!(app.registry.is_favorite("neon-noir"));
        assert!(app.registry.contains("cosmic-dust"));
        assert_eq!(app.registry.all_themes()[0].id, "neon-noir");
    }

    #[tokio::test]
    async fn test_dryrun_session_end_to_end() {
        let dir = TempDir::new().unwrap();
        let app = App::bootstrap(Some(dir.path())).await.unwrap();
        let orchestrator = app.orchestrator(Arc::new(DryrunStudio::new()));

        orchestrator.set_image_data(ImageData::from_bytes(&PNG_HEADER, None).unwrap());
        let state = orchestrator.run_to_completion(&[]).await.unwrap();
        orchestrator.wait_for_background().await;

        assert_eq!(state.stage, SessionStage::Result);
        assert_eq!(state.reflection_mode, ReflectionMode::Full);
        assert_eq!(state.poem_lines.len(), 3);
        assert!(
            state
                .live_artifact
                .stylized_image
                .as_deref()
                .is_some_and(|image| image.starts_with("data:image/svg+xml;base64,"))
        );
        assert_eq!(state.live_artifact.poem, state.final_poem.unwrap());
    }
}
