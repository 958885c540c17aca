//! Pipeline collaborator traits.
//!
//! The analysis, generation and theme design stages are external AI
//! capabilities. The core only depends on these contracts; implementations
//! live in `reverie-interaction`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::ImageData;
use crate::session::{PoemAct, ReflectionMode};
use crate::theme::Theme;

/// Input for the analysis stage.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImageData,
    pub theme: Theme,
    pub mode: ReflectionMode,
}

/// Poem skeleton and visual tags extracted from a photo.
///
/// Every field defaults when missing so that partial responses deserialize;
/// the orchestrator decides whether the result is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    #[serde(default)]
    pub acts: Vec<PoemAct>,
    #[serde(default)]
    pub visual_tags: Vec<String>,
    /// Single caption returned in visual mode
    #[serde(default)]
    pub caption: Option<String>,
}

/// Input for the generation stage.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: ImageData,
    pub theme: Theme,
    /// Visual tags joined with ", "
    pub visual_tags: String,
    /// Finished poem, only for themes that draw on it
    pub poem_context: Option<String>,
}

/// Result of the generation stage.
///
/// A missing image means no artifact was produced; it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub version: String,
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome>;
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome>;
}

/// Designs a new theme from a free-form user prompt.
#[async_trait]
pub trait ThemeDesigner: Send + Sync {
    /// Returns `None` when the prompt could not be turned into a theme.
    async fn design_theme(&self, prompt: &str) -> Result<Option<Theme>>;
}
