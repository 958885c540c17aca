//! Deterministic offline studio.
//!
//! Stands in for the remote AI service: every answer is derived from a
//! SHA-256 digest of its inputs, so the same photo and theme always produce
//! the same acts, tags and image.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use reverie_core::error::{ReverieError, Result};
use reverie_core::session::{PoemAct, ReflectionMode};
use reverie_core::studio::{
    AnalysisOutcome, AnalysisRequest, AnalysisService, GenerationOutcome, GenerationRequest,
    GenerationService, ThemeDesigner,
};
use reverie_core::theme::{Theme, ThemeSource, ThemeStyle};
use sha2::{Digest, Sha256};

use crate::prompt::{PROMPT_VERSION, PromptComposer};

const TAG_VOCABULARY: [&str; 16] = [
    "harbor", "lanterns", "old stairs", "a bicycle", "rain", "wildflowers", "a window",
    "the sea", "a bridge", "paper cranes", "streetlights", "a quiet cafe", "pine trees",
    "a rooftop", "morning fog", "a river",
];

const FEELINGS: [&str; 8] = [
    "unhurried", "tender", "bright", "borrowed", "electric", "patient", "weightless", "golden",
];

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

fn digest(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn pick<'a>(words: &[&'a str], byte: u8) -> &'a str {
    words[byte as usize % words.len()]
}

pub struct DryrunStudio {
    composer: PromptComposer,
    latency: Duration,
}

impl Default for DryrunStudio {
    fn default() -> Self {
        Self::new()
    }
}

impl DryrunStudio {
    pub fn new() -> Self {
        Self {
            composer: PromptComposer::new(),
            latency: Duration::ZERO,
        }
    }

    /// Simulates network latency on every collaborator call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn visual_tags(image_digest: &[u8; 32]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for byte in image_digest.iter() {
            let tag = pick(&TAG_VOCABULARY, *byte);
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
            if tags.len() == 3 {
                break;
            }
        }
        tags
    }

    fn acts(tags: &[String], theme_digest: &[u8; 32]) -> Vec<PoemAct> {
        let feeling = |i: usize| pick(&FEELINGS, theme_digest[i]);
        let tag = |i: usize| tags.get(i).map(String::as_str).unwrap_or("this place");
        vec![
            PoemAct::new(
                format!("Beside {} the air feels ____", tag(0)),
                &[feeling(0), feeling(1), "new"],
            ),
            PoemAct::new(
                format!("I keep {} like ____", tag(1)),
                &["a letter", "a promise", "a pocket stone"],
            ),
            PoemAct::new(
                format!("until {} turns ____", tag(2)),
                &[feeling(2), "silver", "to morning"],
            ),
        ]
    }

    fn render_svg(prompt: &str, style: &ThemeStyle) -> String {
        let d = digest(&[prompt.as_bytes()]);
        let tint = format!("#{}", hex::encode(&d[..3]));
        let background = if style.background_color.is_empty() {
            "#ffffff"
        } else {
            style.background_color.as_str()
        };
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"512\" height=\"512\">\
             <rect width=\"512\" height=\"512\" fill=\"{}\"/>\
             <circle cx=\"256\" cy=\"256\" r=\"{}\" fill=\"{}\"/></svg>",
            background,
            96 + d[3] as u32 % 128,
            tint
        )
    }
}

#[async_trait]
impl AnalysisService for DryrunStudio {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome> {
        self.simulate_latency().await;

        let bytes = request.image.decode()?;
        let image_digest = digest(&[&bytes]);
        let theme_digest = digest(&[&bytes, request.theme.id.as_bytes()]);
        let visual_tags = Self::visual_tags(&image_digest);

        tracing::debug!(
            "[DryrunStudio] Analyzed {} bytes for theme {}: {:?}",
            request.image.byte_len(),
            request.theme.id,
            visual_tags
        );

        let outcome = match request.mode {
            ReflectionMode::Full => AnalysisOutcome {
                acts: Self::acts(&visual_tags, &theme_digest),
                visual_tags,
                caption: None,
            },
            ReflectionMode::Visual => {
                let caption = format!(
                    "{} in {} light",
                    capitalize(&visual_tags[0]),
                    pick(&FEELINGS, theme_digest[0])
                );
                AnalysisOutcome {
                    acts: Vec::new(),
                    visual_tags,
                    caption: Some(caption),
                }
            }
        };
        Ok(outcome)
    }
}

#[async_trait]
impl GenerationService for DryrunStudio {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        self.simulate_latency().await;

        let prompt = self.composer.compose_visual_prompt(
            &request.theme,
            &request.visual_tags,
            request.poem_context.as_deref(),
        )?;
        let svg = Self::render_svg(&prompt, &request.theme.style);
        let image = format!(
            "data:image/svg+xml;base64,{}",
            BASE64_STANDARD.encode(svg.as_bytes())
        );

        Ok(GenerationOutcome {
            image: Some(image),
            prompt,
            version: PROMPT_VERSION.to_string(),
        })
    }
}

#[async_trait]
impl ThemeDesigner for DryrunStudio {
    async fn design_theme(&self, prompt: &str) -> Result<Option<Theme>> {
        self.simulate_latency().await;

        // Braces would be read as template syntax by the prompt composer
        let description = prompt
            .replace(['{', '}'], "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if description.is_empty() {
            return Ok(None);
        }

        let slug = NON_SLUG_CHARS
            .replace_all(&description.to_lowercase(), "-")
            .trim_matches('-')
            .chars()
            .take(32)
            .collect::<String>();
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            return Err(ReverieError::invalid_input(
                "Theme prompt needs at least one letter or digit",
            ));
        }

        let d = digest(&[description.as_bytes()]);
        let display_name = description
            .split(' ')
            .take(4)
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        let short_name = display_name
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Some(Theme {
            id: format!("custom-{}", slug),
            display_name,
            short_name,
            narrative_template: format!(
                "You are a poet inspired by {}. Keep every line short and concrete.",
                description
            ),
            visual_prompt: format!("An artwork of {{{{ tags }}}} in the style of {}", description),
            style: ThemeStyle {
                primary_color: format!("#{}", hex::encode(&d[0..3])),
                accent_color: format!("#{}", hex::encode(&d[3..6])),
                background_color: format!("#{}", hex::encode(&d[6..9])),
                font_family: "Inter".to_string(),
            },
            loading_messages: vec![format!("Imagining {}...", description)],
            disable_narrative: false,
            use_poem_for_image_generation: false,
            source: ThemeSource::Custom,
        }))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
