//! Synchronous key/value persistence for session state.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Durable string key/value storage that outlives one run.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Apply several writes together. `None` removes the key.
    fn write_batch(&mut self, batch: &[(String, Option<String>)]) -> Result<(), StoreError> {
        for (key, value) in batch {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store backed by one JSON object on disk.
///
/// Every `set`, `remove` and `write_batch` replaces the file atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// Open the store, starting empty if the file is damaged.
    pub fn open_or_recover(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::open(&path) {
            Err(e) if e.is_corruption() => {
                tracing::warn!("{e}; starting with an empty session");
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a temp file next to the target, then rename it over.
    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Encode {
                key: "*".into(),
                source,
            }
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn write_batch(&mut self, batch: &[(String, Option<String>)]) -> Result<(), StoreError> {
        let mut changed = false;
        for (key, value) in batch {
            changed |= match value {
                Some(value) => {
                    self.entries.insert(key.clone(), value.clone()).as_ref() != Some(value)
                }
                None => self.entries.remove(key).is_some(),
            };
        }
        if changed {
            self.flush()?;
        }
        Ok(())
    }
}
