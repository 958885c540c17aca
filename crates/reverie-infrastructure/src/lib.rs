//! Infrastructure layer for Reverie.
//!
//! File locations, atomic TOML storage, the key-value preference store and
//! the configuration service.

pub mod config_service;
pub mod dto;
pub mod paths;
pub mod preference_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::ReveriePaths;
pub use crate::preference_repository::PreferenceRepositoryImpl;
pub use crate::storage::{KeyValueStore, MemoryKeyValueStore, TomlKeyValueStore};
