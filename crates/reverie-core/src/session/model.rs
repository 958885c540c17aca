//! Session state model.

use serde::{Deserialize, Serialize};

use super::poem::{PoemAct, PoemLine};
use super::stage::SessionStage;
use crate::artifact::Artifact;
use crate::image::ImageData;

/// How the user wants to reflect on a photo.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReflectionMode {
    /// Interactive three-act poem dialogue
    #[default]
    Full,
    /// Single generated caption, no dialogue
    Visual,
}

/// The orchestrator's copy of the active theme's artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LiveArtifact {
    pub stylized_image: Option<String>,
    pub prompt: String,
    pub prompt_version: String,
    pub poem: String,
}

impl LiveArtifact {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_image(&self) -> bool {
        self.stylized_image.is_some()
    }
}

impl From<&Artifact> for LiveArtifact {
    fn from(artifact: &Artifact) -> Self {
        Self {
            stylized_image: Some(artifact.image_url.clone()),
            prompt: artifact.prompt.clone(),
            prompt_version: artifact.prompt_version.clone(),
            poem: artifact.poem.clone(),
        }
    }
}

/// Everything the orchestrator tracks for the current photo.
///
/// The current act index is derived from the number of completed lines, so
/// it can never drift from the line history.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub active_theme_id: String,
    pub reflection_mode: ReflectionMode,
    pub stage: SessionStage,
    /// Set once per upload; not included in serialized snapshots
    #[serde(skip)]
    pub original_image: Option<ImageData>,
    pub poem_acts: Vec<PoemAct>,
    pub poem_lines: Vec<PoemLine>,
    pub final_poem: Option<String>,
    pub visual_tags: Vec<String>,
    pub live_artifact: LiveArtifact,
    pub error_message: Option<String>,
}

impl SessionState {
    pub fn new(active_theme_id: impl Into<String>, reflection_mode: ReflectionMode) -> Self {
        Self {
            active_theme_id: active_theme_id.into(),
            reflection_mode,
            stage: SessionStage::Landing,
            original_image: None,
            poem_acts: Vec::new(),
            poem_lines: Vec::new(),
            final_poem: None,
            visual_tags: Vec::new(),
            live_artifact: LiveArtifact::default(),
            error_message: None,
        }
    }

    pub fn current_act_index(&self) -> usize {
        self.poem_lines.len()
    }

    /// The act awaiting an answer, if the dialogue is still open.
    pub fn current_act(&self) -> Option<&PoemAct> {
        if self.final_poem.is_some() {
            return None;
        }
        self.poem_acts.get(self.current_act_index())
    }

    pub fn is_dialogue_complete(&self) -> bool {
        !self.poem_acts.is_empty() && self.poem_lines.len() == self.poem_acts.len()
    }

    /// Clears per-photo state, keeping the theme and reflection mode.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.active_theme_id), self.reflection_mode);
    }

    /// Clears per-photo progress for a fresh analysis run, keeping the image.
    pub fn clear_progress(&mut self) {
        self.poem_acts.clear();
        self.poem_lines.clear();
        self.final_poem = None;
        self.visual_tags.clear();
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_reflection_mode_round_trips_as_string() {
        assert_eq!(ReflectionMode::Visual.to_string(), "visual");
        assert_eq!(ReflectionMode::from_str("FULL").unwrap(), ReflectionMode::Full);
        assert!(ReflectionMode::from_str("sepia").is_err());
    }

    #[test]
    fn test_reset_keeps_theme_and_mode() {
        let mut state = SessionState::new("neon-noir", ReflectionMode::Visual);
        state.stage = SessionStage::Result;
        state.final_poem = Some("poem".to_string());
        state.visual_tags = vec!["harbor".to_string()];
        state.live_artifact.stylized_image = Some("data:image/png;base64,AAAA".to_string());
        state.error_message = Some("boom".to_string());

        state.reset();

        assert_eq!(state.active_theme_id, "neon-noir");
        assert_eq!(state.reflection_mode, ReflectionMode::Visual);
        assert_eq!(state.stage, SessionStage::Landing);
        assert!(state.final_poem.is_none());
        assert!(state.visual_tags.is_empty());
        assert!(!state.live_artifact.has_image());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_current_act_follows_line_count() {
        let mut state = SessionState::new("golden-hour", ReflectionMode::Full);
        state.poem_acts = crate::session::fallback_acts();
        assert_eq!(state.current_act_index(), 0);

        state
            .poem_lines
            .push(PoemLine::from_starter(&state.poem_acts[0].starter, "gold"));
        assert_eq!(state.current_act_index(), 1);
        assert_eq!(state.current_act(), Some(&state.poem_acts[1]));
        assert!(!state.is_dialogue_complete());
    }
}
