//! Unified path management for reverie files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/reverie/           # Config directory
//! ├── config.toml              # Studio configuration
//! ├── preferences.toml         # Favorites, unlocked and custom themes, mode
//! └── logs/                    # Application logs
//!     └── reverie.log.YYYY-MM-DD
//! ```
//!
//! A base directory can be supplied to relocate everything (tests, `--config-dir`).

use std::path::{Path, PathBuf};

use reverie_core::error::{ReverieError, Result};

const APP_DIR_NAME: &str = "reverie";

/// Kinds of files managed under the config directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Preferences,
    Logs,
}

impl ServiceType {
    fn relative_path(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Preferences => "preferences.toml",
            ServiceType::Logs => "logs",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReveriePaths {
    base: Option<PathBuf>,
}

impl ReveriePaths {
    /// Creates a path resolver. `None` uses the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the reverie configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ReverieError::config("Cannot find config directory"))
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(service.relative_path()))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        self.get_path(ServiceType::Config)
    }

    pub fn preferences_file(&self) -> Result<PathBuf> {
        self.get_path(ServiceType::Preferences)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        self.get_path(ServiceType::Logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = ReveriePaths::new(Some(Path::new("/tmp/reverie-test")));
        assert_eq!(
            paths.preferences_file().unwrap(),
            PathBuf::from("/tmp/reverie-test/preferences.toml")
        );
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/reverie-test/config.toml")
        );
        assert_eq!(paths.log_dir().unwrap(), PathBuf::from("/tmp/reverie-test/logs"));
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(dir) = ReveriePaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
