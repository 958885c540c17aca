//! Built-in and secret theme presets.

use super::model::{Theme, ThemeSource, ThemeStyle};

/// ID of the theme selected on first launch.
pub const DEFAULT_THEME_ID: &str = "golden-hour";

#[allow(clippy::too_many_arguments)]
fn theme(
    id: &str,
    display_name: &str,
    short_name: &str,
    narrative_template: &str,
    visual_prompt: &str,
    colors: [&str; 3],
    font_family: &str,
    loading_messages: &[&str],
    source: ThemeSource,
) -> Theme {
    Theme {
        id: id.to_string(),
        display_name: display_name.to_string(),
        short_name: short_name.to_string(),
        narrative_template: narrative_template.to_string(),
        visual_prompt: visual_prompt.to_string(),
        style: ThemeStyle {
            primary_color: colors[0].to_string(),
            accent_color: colors[1].to_string(),
            background_color: colors[2].to_string(),
            font_family: font_family.to_string(),
        },
        loading_messages: loading_messages.iter().map(|m| m.to_string()).collect(),
        disable_narrative: false,
        use_poem_for_image_generation: false,
        source,
    }
}

/// Returns the themes shipped with the application, in display order.
pub fn get_builtin_themes() -> Vec<Theme> {
    let mut ink = theme(
        "ink-wash",
        "Ink Wash Reverie",
        "Ink",
        "You are a classical ink painter who writes sparse, quiet verse. Favor stillness, mist and negative space.",
        "A sumi-e ink wash painting of {{ tags }}, soft grey gradients, generous empty paper, a single red seal stamp",
        ["#1f1f1f", "#b3261e", "#f4efe6"],
        "Noto Serif",
        &["Grinding the ink...", "Letting the brush rest...", "Waiting for the mist to settle..."],
        ThemeSource::BuiltIn,
    );
    ink.use_poem_for_image_generation = true;

    let mut postcard = theme(
        "vintage-postcard",
        "Vintage Postcard",
        "Postcard",
        "You are a traveller writing a short postcard home. Be warm, specific and a little nostalgic.",
        "A 1950s travel postcard illustration of {{ tags }}, halftone print texture, bold retro lettering space",
        ["#234e70", "#f2a541", "#fbf3e4"],
        "Playfair Display",
        &["Licking the stamp...", "Finding a mailbox...", "Adding a postmark..."],
        ThemeSource::BuiltIn,
    );
    postcard.disable_narrative = true;

    vec![
        theme(
            DEFAULT_THEME_ID,
            "Golden Hour Letters",
            "Golden",
            "You are a gentle poet who notices warm light and small kindnesses. Write in plain, tender language.",
            "A warm golden hour photograph of {{ tags }}, film grain, soft lens flare, amber highlights",
            ["#8a4b08", "#f6c453", "#fff8ec"],
            "Lora",
            &["Catching the last light...", "Warming the colors...", "Writing in the margins..."],
            ThemeSource::BuiltIn,
        ),
        ink,
        theme(
            "neon-noir",
            "Neon Noir",
            "Noir",
            "You are a hard-boiled narrator in a rain-soaked city. Short sentences, vivid contrast.",
            "A cinematic neon noir scene of {{ tags }}, wet streets, magenta and cyan reflections, deep shadows",
            ["#0d0221", "#ff2a6d", "#05d9e8"],
            "Space Grotesk",
            &["Flicking on the signs...", "Waiting for the rain...", "Lighting a cigarette..."],
            ThemeSource::BuiltIn,
        ),
        postcard,
        theme(
            "storybook",
            "Storybook Garden",
            "Story",
            "You are a children's book author. Write with wonder, gentle rhythm and friendly animals in mind.",
            "A whimsical watercolor storybook illustration of {{ tags }}, pastel palette, hand-drawn outlines",
            ["#3c6e47", "#e98a9a", "#fdf6f0"],
            "Baloo 2",
            &["Sharpening the crayons...", "Turning the page...", "Inviting the rabbits..."],
            ThemeSource::BuiltIn,
        ),
    ]
}

/// A secret theme and the code that unlocks it.
#[derive(Debug, Clone)]
pub struct SecretTheme {
    pub code: &'static str,
    pub theme: Theme,
}

/// Returns the fixed table of secret themes.
///
/// Unlocked themes are persisted by id only and rehydrated against this table.
pub fn get_secret_themes() -> Vec<SecretTheme> {
    let mut cosmic = theme(
        "cosmic-dust",
        "Cosmic Dust",
        "Cosmic",
        "You are an astronomer writing love letters to the universe. Scale everything up to the stars.",
        "A dreamy cosmic scene where {{ tags }} dissolve into nebulae and stardust, deep violet and teal{% if poem %}, inspired by the verse: {{ poem }}{% endif %}",
        ["#1b1035", "#7de2d1", "#0b0620"],
        "Orbitron",
        &["Aligning the telescopes...", "Counting the stars...", "Folding space..."],
        ThemeSource::Secret,
    );
    cosmic.use_poem_for_image_generation = true;

    vec![
        SecretTheme {
            code: "STARGAZER",
            theme: cosmic,
        },
        SecretTheme {
            code: "PIXELHEART",
            theme: theme(
                "pixel-arcade",
                "Pixel Arcade",
                "Pixel",
                "You are an 8-bit game narrator. Every moment is a level, every line a power-up.",
                "A 16-bit pixel art rendition of {{ tags }}, limited palette, crisp dithering, arcade cabinet glow",
                ["#222034", "#fbf236", "#5b6ee1"],
                "Press Start 2P",
                &["Inserting coin...", "Loading level...", "Saving high score..."],
                ThemeSource::Secret,
            ),
        },
    ]
}

/// Looks up a secret theme by unlock code (trimmed, case-insensitive).
pub fn find_secret_by_code(code: &str) -> Option<Theme> {
    let wanted = code.trim();
    if wanted.is_empty() {
        return None;
    }
    get_secret_themes()
        .into_iter()
        .find(|secret| secret.code.eq_ignore_ascii_case(wanted))
        .map(|secret| secret.theme)
}

/// Looks up a secret theme by id.
pub fn find_secret_by_id(id: &str) -> Option<Theme> {
    get_secret_themes()
        .into_iter()
        .find(|secret| secret.theme.id == id)
        .map(|secret| secret.theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let themes = get_builtin_themes();
        let ids: HashSet<_> = themes.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), themes.len());
        assert!(ids.contains(DEFAULT_THEME_ID));
    }

    #[test]
    fn test_secret_ids_do_not_clash_with_builtins() {
        let builtin: HashSet<_> = get_builtin_themes().into_iter().map(|t| t.id).collect();
        for secret in get_secret_themes() {
            assert!(!builtin.contains(&secret.theme.id));
            assert_eq!(secret.theme.source, ThemeSource::Secret);
        }
    }

    #[test]
    fn test_find_secret_by_code_is_case_insensitive() {
        let theme = find_secret_by_code("  stargazer ").unwrap();
        assert_eq!(theme.id, "cosmic-dust");
        assert!(find_secret_by_code("nope").is_none());
        assert!(find_secret_by_code("   ").is_none());
    }
}
