use serde::Serialize;

use super::stage::SessionStage;

/// State-change notifications published by the session orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    StageChanged {
        stage: SessionStage,
    },
    /// `restored` is true when the theme's artifact came from the cache.
    ThemeChanged {
        theme_id: String,
        restored: bool,
    },
    ArtifactUpdated {
        theme_id: String,
        has_image: bool,
    },
    LineCompleted {
        act_index: usize,
        line: String,
    },
    PoemFinalized {
        poem: String,
    },
    Reset,
}
