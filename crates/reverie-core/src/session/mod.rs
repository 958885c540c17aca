//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Per-photo session state (`SessionState`, `LiveArtifact`, `ReflectionMode`)
//! - `stage`: Stage machine (`SessionStage`)
//! - `event`: Change notifications (`SessionEvent`)
//! - `poem`: Dialogue line construction and poem finalization

mod event;
mod model;
mod poem;
mod stage;

pub use event::SessionEvent;
pub use model::{LiveArtifact, ReflectionMode, SessionState};
pub use poem::{
    ACT_COUNT, BLANK_PLACEHOLDER, FALLBACK_CAPTION, PoemAct, PoemLine, fallback_acts,
    finalize_poem, normalize_caption,
};
pub use stage::SessionStage;
