//! Artifact domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The output produced for one theme in the current session.
///
/// An artifact pairs the stylized image with the exact prompt that produced
/// it, the prompt version tag and the poem shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Theme this artifact was generated for
    pub theme_id: String,
    /// Stylized image as a data URI or blob reference
    pub image_url: String,
    /// Poem text, may contain bracketed highlight spans
    pub poem: String,
    /// Prompt sent to the image generator
    pub prompt: String,
    /// Version tag of the prompt template
    pub prompt_version: String,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(
        theme_id: impl Into<String>,
        image_url: impl Into<String>,
        poem: impl Into<String>,
        prompt: impl Into<String>,
        prompt_version: impl Into<String>,
    ) -> Self {
        Self {
            theme_id: theme_id.into(),
            image_url: image_url.into(),
            poem: poem.into(),
            prompt: prompt.into(),
            prompt_version: prompt_version.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns a copy carrying a different poem, keeping image and prompt.
    pub fn with_poem(&self, poem: impl Into<String>) -> Self {
        Self {
            poem: poem.into(),
            ..self.clone()
        }
    }
}
