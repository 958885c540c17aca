//! Domain layer for Reverie.
//!
//! Themes, artifacts, session state and the contracts the application layer
//! drives: preference persistence and the AI pipeline collaborators.

pub mod artifact;
pub mod config;
pub mod error;
pub mod image;
pub mod preference;
pub mod session;
pub mod studio;
pub mod theme;

pub use error::{Result, ReverieError};
