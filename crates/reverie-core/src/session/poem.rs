//! Poem construction for the fill-in-the-blank dialogue.
//!
//! Each act offers a starter line with a blank (a run of underscores). The
//! user's answer is spliced into the blank, highlighted with square brackets,
//! and the line is auto-punctuated when it lacks an ending.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical blank placeholder used in act starters.
pub const BLANK_PLACEHOLDER: &str = "____";

/// Number of acts a full-mode poem is made of.
pub const ACT_COUNT: usize = 3;

/// Caption used in visual mode when analysis returns none.
pub const FALLBACK_CAPTION: &str = "A moment worth keeping.";

static BLANK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_{2,}").expect("blank pattern is a valid regex"));

const TERMINAL_PUNCTUATION: [char; 4] = ['.', '!', '?', '…'];
const CLOSING_QUOTES: [char; 5] = ['"', '\'', '”', '’', ')'];

/// One stage of the poem dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemAct {
    /// Starter line containing a blank placeholder
    pub starter: String,
    /// Candidate answers offered to the user
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl PoemAct {
    pub fn new(starter: impl Into<String>, suggestions: &[&str]) -> Self {
        Self {
            starter: starter.into(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// An act is usable when its starter has visible text.
    pub fn is_well_formed(&self) -> bool {
        !normalize_text(&self.starter).is_empty()
    }
}

/// The acts used whenever analysis cannot provide exactly three usable ones.
pub fn fallback_acts() -> Vec<PoemAct> {
    vec![
        PoemAct::new(
            "In this frame the light feels ____",
            &["soft", "golden", "patient"],
        ),
        PoemAct::new(
            "I want to remember the ____",
            &["quiet", "colors", "way it felt"],
        ),
        PoemAct::new(
            "and carry it home like ____",
            &["a secret", "a warm stone", "a song"],
        ),
    ]
}

/// A completed dialogue line split around the user's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemLine {
    pub prefix: String,
    pub user_input: String,
    pub suffix: String,
}

impl PoemLine {
    /// Splices `input` into the first blank of `starter`.
    ///
    /// Without a blank the whole starter becomes the prefix and the answer is
    /// appended after it.
    pub fn from_starter(starter: &str, input: &str) -> Self {
        let starter = normalize_text(starter);
        let user_input = normalize_text(input).replace(['[', ']'], "");

        let (prefix, suffix) = match BLANK_PATTERN.find(&starter) {
            Some(blank) => (
                starter[..blank.start()].trim().to_string(),
                starter[blank.end()..].trim().to_string(),
            ),
            None => (starter.trim().to_string(), String::new()),
        };

        Self {
            prefix,
            user_input,
            suffix,
        }
    }

    /// The line with the answer wrapped in highlight brackets, punctuated.
    pub fn highlighted(&self) -> String {
        let text = self.join(&format!("[{}]", self.user_input));
        if has_terminal_punctuation(&self.plain_unpunctuated()) {
            text
        } else {
            format!("{}.", text)
        }
    }

    /// The line without highlight markers, punctuated.
    pub fn plain(&self) -> String {
        let text = self.plain_unpunctuated();
        if has_terminal_punctuation(&text) {
            text
        } else {
            format!("{}.", text)
        }
    }

    fn plain_unpunctuated(&self) -> String {
        self.join(&self.user_input)
    }

    fn join(&self, middle: &str) -> String {
        [self.prefix.as_str(), middle, self.suffix.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Joins completed lines into the final poem, one highlighted line per act.
pub fn finalize_poem(lines: &[PoemLine]) -> String {
    lines
        .iter()
        .map(PoemLine::highlighted)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalizes a visual-mode caption, falling back when it is blank.
pub fn normalize_caption(caption: Option<&str>) -> String {
    let caption = caption.map(normalize_text).unwrap_or_default();
    if caption.is_empty() {
        FALLBACK_CAPTION.to_string()
    } else {
        caption
    }
}

/// Removes hard line breaks and literal `\n` escapes, collapsing whitespace.
fn normalize_text(text: &str) -> String {
    text.replace("\\n", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_terminal_punctuation(text: &str) -> bool {
    text.trim_end()
        .trim_end_matches(CLOSING_QUOTES)
        .ends_with(TERMINAL_PUNCTUATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_starter_around_blank() {
        let line = PoemLine::from_starter("Line one ____ end", "two");
        assert_eq!(line.prefix, "Line one");
        assert_eq!(line.user_input, "two");
        assert_eq!(line.suffix, "end");
        assert_eq!(line.highlighted(), "Line one [two] end.");
        assert_eq!(line.plain(), "Line one two end.");
    }

    #[test]
    fn test_blank_at_end_of_line() {
        let line = PoemLine::from_starter("The harbor sleeps ______", "tonight");
        assert_eq!(line.suffix, "");
        assert_eq!(line.highlighted(), "The harbor sleeps [tonight].");
    }

    #[test]
    fn test_existing_punctuation_is_kept() {
        let line = PoemLine::from_starter("Who could forget ____", "this?");
        assert_eq!(line.highlighted(), "Who could forget [this?]");

        let quoted = PoemLine::from_starter("She said ____", "\"stay.\"");
        assert_eq!(quoted.highlighted(), "She said [\"stay.\"]");
    }

    #[test]
    fn test_starter_without_blank_appends_answer() {
        let line = PoemLine::from_starter("Morning comes", "slowly");
        assert_eq!(line.prefix, "Morning comes");
        assert_eq!(line.suffix, "");
        assert_eq!(line.highlighted(), "Morning comes [slowly].");
    }

    #[test]
    fn test_newline_escapes_are_flattened() {
        let line = PoemLine::from_starter("first\\nsecond ____", "third\nfourth");
        assert_eq!(line.highlighted(), "first second [third fourth].");
    }

    #[test]
    fn test_finalize_poem_uses_real_line_breaks() {
        let lines: Vec<PoemLine> = fallback_acts()
            .iter()
            .zip(["a", "b", "c"])
            .map(|(act, input)| PoemLine::from_starter(&act.starter, input))
            .collect();

        let poem = finalize_poem(&lines);
        assert!(!poem.contains("\\n"));
        assert_eq!(poem.lines().count(), ACT_COUNT);
        assert_eq!(poem.lines().next(), Some("In this frame the light feels [a]."));
        assert!(poem.lines().nth(2).unwrap().contains("[c]"));
    }

    #[test]
    fn test_fallback_acts_are_well_formed() {
        let acts = fallback_acts();
        assert_eq!(acts.len(), ACT_COUNT);
        assert!(acts.iter().all(PoemAct::is_well_formed));
        assert!(acts.iter().all(|act| act.starter.contains(BLANK_PLACEHOLDER)));
    }

    #[test]
    fn test_normalize_caption() {
        assert_eq!(normalize_caption(Some("A quiet harbor")), "A quiet harbor");
        assert_eq!(normalize_caption(Some("  ")), FALLBACK_CAPTION);
        assert_eq!(normalize_caption(None), FALLBACK_CAPTION);
    }
}
