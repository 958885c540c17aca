//! Application layer for Reverie.
//!
//! Coordinates the domain and infrastructure layers: the session artifact
//! cache, the session orchestrator that drives the analysis, dialogue and
//! generation pipeline, and the custom theme service.

pub mod custom_theme_service;
pub mod session;

pub use custom_theme_service::CustomThemeService;
pub use session::{InMemoryArtifactCache, OrchestratorSettings, RequestTag, SessionOrchestrator};
