//! Session stage machine.

use serde::{Deserialize, Serialize};

/// The stage a postcard session is in.
///
/// ```text
/// landing -> analyzing -> dialogue -> generating -> result
///                      \-> generating (visual mode / narrative disabled)
/// analyzing | generating -> error
/// any -> landing (reset)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStage {
    #[default]
    Landing,
    Analyzing,
    Dialogue,
    Generating,
    Result,
    Error,
}

impl SessionStage {
    /// Whether the stage machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: SessionStage) -> bool {
        use SessionStage::*;

        match (self, next) {
            (_, Landing) => true,
            (Landing | Dialogue | Result, Analyzing) => true,
            (Analyzing, Dialogue | Generating | Error) => true,
            (Dialogue | Result, Generating) => true,
            (Generating, Result | Error) => true,
            _ => false,
        }
    }

    /// Whether a collaborator call is in flight for the critical path.
    pub fn is_busy(self) -> bool {
        matches!(self, SessionStage::Analyzing | SessionStage::Generating)
    }
}
