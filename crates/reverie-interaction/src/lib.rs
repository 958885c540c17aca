//! Pipeline collaborator implementations.
//!
//! - `prompt`: Renders theme templates into analysis and generation prompts
//! - `dryrun`: Deterministic offline studio implementing every collaborator trait

pub mod dryrun;
pub mod prompt;

pub use dryrun::DryrunStudio;
pub use prompt::{PROMPT_VERSION, PromptComposer};
