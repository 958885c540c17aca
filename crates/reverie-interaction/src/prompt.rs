//! Prompt composition.
//!
//! Theme `visual_prompt` and `narrative_template` fields are minijinja
//! templates. Visual prompts see `tags`, `poem` and `theme`; narrative
//! templates see `theme` and `mode`.

use minijinja::{Environment, context};
use reverie_core::error::{ReverieError, Result};
use reverie_core::session::{ACT_COUNT, BLANK_PLACEHOLDER, ReflectionMode};
use reverie_core::theme::Theme;

/// Version tag recorded on every artifact produced from a composed prompt.
pub const PROMPT_VERSION: &str = "reverie-prompt-v2";

pub struct PromptComposer {
    env: Environment<'static>,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Renders the image generation prompt for `theme`.
    ///
    /// Highlight brackets are stripped from the poem. A theme whose template
    /// never mentions the poem still gets it appended as a closing mood line.
    pub fn compose_visual_prompt(
        &self,
        theme: &Theme,
        visual_tags: &str,
        poem: Option<&str>,
    ) -> Result<String> {
        let poem = poem
            .map(|p| flatten(&p.replace(['[', ']'], "")))
            .filter(|p| !p.is_empty());

        let rendered = self
            .env
            .render_str(
                &theme.visual_prompt,
                context! {
                    tags => visual_tags,
                    poem => poem.as_deref(),
                    theme => theme,
                },
            )
            .map_err(|e| {
                ReverieError::generation(format!(
                    "Invalid visual prompt template for theme '{}': {}",
                    theme.id, e
                ))
            })?;

        let mut prompt = flatten(&rendered);
        if let Some(poem) = poem.as_deref() {
            if !theme.visual_prompt.contains("poem") {
                prompt = format!("{}. Mood: {}", prompt.trim_end_matches('.'), poem);
            }
        }
        Ok(prompt)
    }

    /// Renders the instructions sent to the analysis stage.
    pub fn compose_analysis_prompt(&self, theme: &Theme, mode: ReflectionMode) -> Result<String> {
        let persona = self
            .env
            .render_str(
                &theme.narrative_template,
                context! { theme => theme, mode => mode.as_ref() },
            )
            .map_err(|e| {
                ReverieError::analysis(format!(
                    "Invalid narrative template for theme '{}': {}",
                    theme.id, e
                ))
            })?;

        let task = match mode {
            ReflectionMode::Full => format!(
                "Look at the photo and write {} short poem starters, one per act. \
                 Each starter must contain the blank {} for the reader to fill in, \
                 and come with three suggested answers. Also list visual tags.",
                ACT_COUNT, BLANK_PLACEHOLDER
            ),
            ReflectionMode::Visual => {
                "Look at the photo and write a single evocative caption. Also list visual tags."
                    .to_string()
            }
        };

        Ok(format!("{}\n\n{}", persona.trim(), task))
    }
}

fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::theme::{find_secret_by_id, get_builtin_themes};

    fn builtin(id: &str) -> Theme {
        get_builtin_themes()
            .into_iter()
            .find(|t| t.id == id)
            .unwrap()
    }

    #[test]
    fn test_tags_are_substituted() {
        let composer = PromptComposer::new();
        let prompt = composer
            .compose_visual_prompt(&builtin("neon-noir"), "harbor, boats", None)
            .unwrap();
        assert!(prompt.starts_with("A cinematic neon noir scene of harbor, boats"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_poem_used_by_template_conditional() {
        let composer = PromptComposer::new();
        let theme = find_secret_by_id("cosmic-dust").unwrap();

        let without = composer.compose_visual_prompt(&theme, "moon", None).unwrap();
        assert!(!without.contains("inspired by the verse"));

        let with = composer
            .compose_visual_prompt(&theme, "moon", Some("The [moon] hums.\nSoftly."))
            .unwrap();
        assert!(with.contains("inspired by the verse: The moon hums. Softly."));
        assert!(!with.contains('['));
    }

    #[test]
    fn test_poem_appended_when_template_ignores_it() {
        let composer = PromptComposer::new();
        let prompt = composer
            .compose_visual_prompt(&builtin("ink-wash"), "bridge", Some("A [still] bridge."))
            .unwrap();
        assert!(prompt.ends_with("Mood: A still bridge."));
    }

    #[test]
    fn test_broken_template_is_a_generation_error() {
        let composer = PromptComposer::new();
        let mut theme = builtin("storybook");
        theme.visual_prompt = "{% if tags %}unterminated".to_string();
        let err = composer.compose_visual_prompt(&theme, "cat", None).unwrap_err();
        assert!(err.is_pipeline_failure());
    }

    #[test]
    fn test_analysis_prompt_depends_on_mode() {
        let composer = PromptComposer::new();
        let theme = builtin("golden-hour");
        let full = composer.compose_analysis_prompt(&theme, ReflectionMode::Full).unwrap();
        assert!(full.contains(BLANK_PLACEHOLDER));
        let visual = composer
            .compose_analysis_prompt(&theme, ReflectionMode::Visual)
            .unwrap();
        assert!(visual.contains("single evocative caption"));
        assert!(visual.starts_with("You are a gentle poet"));
    }
}
