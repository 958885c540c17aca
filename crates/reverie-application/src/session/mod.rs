//! Session application services.
//!
//! - `cache`: In-memory artifact cache with an optional LRU bound
//! - `orchestrator`: Drives one photo through analysis, dialogue and generation

mod cache;
mod orchestrator;

pub use cache::InMemoryArtifactCache;
pub use orchestrator::{OrchestratorSettings, RequestTag, SessionOrchestrator};
