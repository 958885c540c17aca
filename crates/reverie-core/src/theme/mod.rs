//! Theme domain module.
//!
//! # Module Structure
//!
//! - `model`: Theme domain model (`Theme`, `ThemeStyle`, `ThemeSource`)
//! - `preset`: Built-in themes and the secret theme table
//! - `registry`: Merged, favorite-sorted view over all themes (`ThemeRegistry`)

mod model;
mod preset;
mod registry;

pub use model::{Theme, ThemeSource, ThemeStyle};
pub use preset::{
    DEFAULT_THEME_ID, SecretTheme, find_secret_by_code, find_secret_by_id, get_builtin_themes,
    get_secret_themes,
};
pub use registry::ThemeRegistry;
