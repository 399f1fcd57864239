//! # Storage Module - Persistent Key-Value Strings
//!
//! The calculator persists its memory register and history log as plain strings under fixed
//! keys ([crate::MEMORY_KEY], [crate::HISTORY_KEY]). Anything that can get and set strings by
//! key can act as its [Storage].
//!
//! Two implementations are provided:
//! - [MemoryStorage]: keeps everything in-process, nothing survives the session
//! - [FileStorage]: keeps every key in a single JSON object on disk

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name used by [FileStorage] inside its directory
pub const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create storage directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to read storage file: {0}")]
    ReadFile(std::io::Error),

    #[error("Failed to write storage file: {0}")]
    WriteFile(std::io::Error),

    #[error("Failed to parse storage file: {0}")]
    Parse(serde_json::Error),
}

/// Synchronous string-keyed persistence
pub trait Storage {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create a storage pre-filled with values
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Storage backed by a JSON file
///
/// All keys live in one object which is loaded on [FileStorage::open] and rewritten as a whole
/// on every [Storage::set].
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage in `directory`, creating the directory if needed
    pub fn open(directory: &Path) -> Result<Self, StorageError> {
        if !directory.exists() {
            fs::create_dir_all(directory).map_err(StorageError::CreateDirectory)?;
        }

        let path = directory.join(STORAGE_FILE);
        let values = if path.is_file() {
            let content = fs::read_to_string(&path).map_err(StorageError::ReadFile)?;
            serde_json::from_str(&content).map_err(StorageError::Parse)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "opened storage");

        Ok(Self { path, values })
    }

    /// The file this storage is written to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Values are only kept once they have been written to disk
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&values).map_err(StorageError::Parse)?;
        fs::write(&self.path, json).map_err(StorageError::WriteFile)?;

        self.values = values;
        Ok(())
    }
}
