use crate::error::KeskusError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Trait for persistence backends holding string values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeskusError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeskusError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), KeskusError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Volatile in-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeskusError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeskusError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KeskusError> {
        self.entries.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

/// One file per key inside a directory. The directory is created on the
/// first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn storage_error(key: &str, e: std::io::Error) -> KeskusError {
    KeskusError::Storage {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeskusError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeskusError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| storage_error(key, e))?;
        std::fs::write(self.path_for(key), value).map_err(|e| storage_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), KeskusError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}
