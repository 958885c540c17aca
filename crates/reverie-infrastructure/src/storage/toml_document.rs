//! Crash-safe TOML documents.
//!
//! A save never leaves a half-written document: the new content is written to
//! a sibling temp file, synced, then renamed over the target. `update` wraps a
//! read-modify-write cycle in an advisory lock shared by every process.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use reverie_core::error::ReverieError;
use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TomlDocumentError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("cannot encode document: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("cannot lock {0}")]
    Lock(PathBuf),
}

impl From<TomlDocumentError> for ReverieError {
    fn from(err: TomlDocumentError) -> Self {
        match err {
            TomlDocumentError::Decode(e) => e.into(),
            TomlDocumentError::Encode(e) => e.into(),
            other => ReverieError::storage(other.to_string()),
        }
    }
}

/// One serde value of type `T` persisted as a TOML file.
pub struct TomlDocument<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> TomlDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document; a missing or blank file reads as `None`.
    pub fn load(&self) -> Result<Option<T>, TomlDocumentError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&text)?))
    }

    pub fn save(&self, value: &T) -> Result<(), TomlDocumentError> {
        let encoded = toml::to_string_pretty(value)?;
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut staged = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        staged
            .write_all(encoded.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        staged
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    /// Applies `edit` to the stored value (or `initial` when there is none)
    /// and saves the result while holding the document lock.
    ///
    /// A malformed document is moved aside to `<path>.corrupt` and replaced,
    /// so one bad file never blocks later writes.
    pub fn update(&self, initial: T, edit: impl FnOnce(&mut T)) -> Result<(), TomlDocumentError> {
        let _guard = DocumentLock::acquire(&self.lock_path())?;
        let stored = match self.load() {
            Ok(stored) => stored,
            Err(TomlDocumentError::Decode(e)) => {
                self.quarantine(&e);
                None
            }
            Err(e) => return Err(e),
        };
        let mut value = stored.unwrap_or(initial);
        edit(&mut value);
        self.save(&value)
    }

    fn quarantine(&self, cause: &toml::de::Error) {
        let backup = self.sibling_path(".corrupt");
        match fs::rename(&self.path, &backup) {
            Ok(()) => tracing::warn!(
                "[TomlDocument] {} is malformed ({}); moved to {} and starting fresh",
                self.path.display(),
                cause,
                backup.display()
            ),
            Err(e) => tracing::warn!(
                "[TomlDocument] {} is malformed ({}); overwriting (backup failed: {})",
                self.path.display(),
                cause,
                e
            ),
        }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling_path(".lock")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> TomlDocumentError {
        TomlDocumentError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Held for the duration of a read-modify-write cycle.
struct DocumentLock {
    file: File,
}

impl DocumentLock {
    fn acquire(path: &Path) -> Result<Self, TomlDocumentError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| TomlDocumentError::Lock(path.to_path_buf()))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|_| TomlDocumentError::Lock(path.to_path_buf()))?;
        file.lock_exclusive()
            .map_err(|_| TomlDocumentError::Lock(path.to_path_buf()))?;
        Ok(Self { file })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tally {
        label: String,
        hits: u32,
    }

    fn tally(hits: u32) -> Tally {
        Tally {
            label: "favorites".to_string(),
            hits,
        }
    }

    #[test]
    fn test_missing_document_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let doc = TomlDocument::<Tally>::new(dir.path().join("absent.toml"));
        assert!(doc.load().unwrap().is_none());
    }

    #[test]
    fn test_blank_document_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.toml");
        fs::write(&path, "  \n").unwrap();
        assert!(TomlDocument::<Tally>::new(path).load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directories_and_stages_nothing() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let doc = TomlDocument::<Tally>::new(nested.join("prefs.toml"));

        doc.save(&tally(3)).unwrap();

        assert_eq!(doc.load().unwrap(), Some(tally(3)));
        let entries: Vec<_> = fs::read_dir(&nested).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_update_starts_from_initial_then_stored_value() {
        let dir = TempDir::new().unwrap();
        let doc = TomlDocument::<Tally>::new(dir.path().join("prefs.toml"));

        doc.update(tally(0), |t| t.hits += 10).unwrap();
        doc.update(tally(0), |t| t.hits += 5).unwrap();

        assert_eq!(doc.load().unwrap().map(|t| t.hits), Some(15));
    }

    #[test]
    fn test_malformed_document_maps_to_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "hits = [1,").unwrap();

        let err = TomlDocument::<Tally>::new(path).load().unwrap_err();
        assert!(matches!(err, TomlDocumentError::Decode(_)));
        assert!(ReverieError::from(err).is_serialization());
    }

    #[test]
    fn test_update_replaces_malformed_document_and_keeps_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "hits = [1,").unwrap();
        let doc = TomlDocument::<Tally>::new(path.clone());

        doc.update(tally(0), |t| t.hits += 2).unwrap();

        assert_eq!(doc.load().unwrap(), Some(tally(2)));
        let backup = dir.path().join("prefs.toml.corrupt");
        assert_eq!(fs::read_to_string(backup).unwrap(), "hits = [1,");
    }
}
