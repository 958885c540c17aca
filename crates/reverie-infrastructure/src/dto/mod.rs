//! Storage DTOs.
//!
//! Persisted shapes are kept separate from domain models so that the domain
//! can evolve without breaking files written by older versions.

mod preferences;
mod theme;

pub use preferences::{PREFERENCES_SCHEMA_VERSION, PreferencesFileDto};
pub use theme::{THEME_SCHEMA_VERSION, ThemeDto, ThemeStyleDto};
