//! Key-value storage backing the record store.
//!
//! The [`Storage`] trait decouples the store from where state lives. The CLI
//! uses [`FileStorage`] (one file per key); embedders and tests can use
//! [`MemoryStorage`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use thiserror::Error;
use tracing::debug;

/// Key holding the serialized document.
pub const DOCUMENT_KEY: &str = "cgpa_data_courses";
/// Key holding the last-viewed semester id (plain string).
pub const SELECTED_SEMESTER_KEY: &str = "lastSelectedSemester";

/// Abstraction over durable key-value storage.
pub trait Storage {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A failed write-through. The in-memory state stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not persist '{key}': {reason}")]
pub struct PersistWarning {
    pub key: String,
    pub reason: String,
}

impl PersistWarning {
    pub fn new(key: &str, err: &anyhow::Error) -> Self {
        Self {
            key: key.to_string(),
            reason: format!("{err:#}"),
        }
    }
}

/// Storage rooted at a directory, one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(anyhow!("invalid storage key '{key}'"));
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "storage read");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        debug!(path = %path.display(), bytes = value.len(), "storage write");
        write_atomic(&path, value)
    }
}

/// Write via temp file + rename so readers never see a partial value.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("storage path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

/// In-process storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
