//! Storage layer: crash-safe TOML documents and the key-value preference store.

mod key_value;
mod toml_document;

pub use key_value::{KeyValueStore, MemoryKeyValueStore, TomlKeyValueStore};
pub use toml_document::{TomlDocument, TomlDocumentError};
