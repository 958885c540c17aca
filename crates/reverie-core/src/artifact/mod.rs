//! Artifact domain module.
//!
//! - `model`: The cached output for one theme (`Artifact`)
//! - `cache`: Cache contract and eviction policy (`ArtifactCache`, `CachePolicy`)

mod cache;
mod model;

pub use cache::{ArtifactCache, CachePolicy};
pub use model::Artifact;
