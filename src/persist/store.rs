//! Storage collaborators for snapshots and preferences.
//!
//! The core never calls these. `Session` does, and absorbs every error.
//!
//! - `MemoryStore`: in-process, for tests and embedding
//! - `FileStore`: one directory holding `match_state` and `preferences.json`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::Preferences;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("preferences are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home for the last match snapshot.
pub trait SnapshotStore {
    /// Store a snapshot blob, replacing any previous one.
    fn save_snapshot(&mut self, blob: &str) -> Result<(), StorageError>;

    /// The last stored blob, if any.
    fn load_snapshot(&self) -> Result<Option<String>, StorageError>;

    /// Forget the stored blob.
    fn clear_snapshot(&mut self) -> Result<(), StorageError>;
}

/// Durable home for preferences.
pub trait PreferencesStore {
    /// Store preferences.
    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StorageError>;

    /// The stored preferences, if any.
    fn load_preferences(&self) -> Result<Option<Preferences>, StorageError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
    preferences: Option<Preferences>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a snapshot blob.
    pub fn with_snapshot(blob: impl Into<String>) -> Self {
        Self {
            snapshot: Some(blob.into()),
            preferences: None,
        }
    }

    /// Seed stored preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// The stored blob.
    #[must_use]
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn save_snapshot(&mut self, blob: &str) -> Result<(), StorageError> {
        self.snapshot = Some(blob.to_string());
        Ok(())
    }

    fn load_snapshot(&self) -> Result<Option<String>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        self.snapshot = None;
        Ok(())
    }
}

impl PreferencesStore for MemoryStore {
    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StorageError> {
        self.preferences = Some(*preferences);
        Ok(())
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        Ok(self.preferences)
    }
}

/// Directory-backed store.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Snapshot file name inside the store directory.
    pub const SNAPSHOT_FILE: &'static str = "match_state";

    /// Preferences file name inside the store directory.
    pub const PREFERENCES_FILE: &'static str = "preferences.json";

    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn read_optional(&self, name: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl SnapshotStore for FileStore {
    fn save_snapshot(&mut self, blob: &str) -> Result<(), StorageError> {
        self.write_atomic(Self::SNAPSHOT_FILE, blob.as_bytes())
    }

    fn load_snapshot(&self) -> Result<Option<String>, StorageError> {
        self.read_optional(Self::SNAPSHOT_FILE)
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(self.path(Self::SNAPSHOT_FILE)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferencesStore for FileStore {
    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(preferences)?;
        self.write_atomic(Self::PREFERENCES_FILE, &bytes)
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        match self.read_optional(Self::PREFERENCES_FILE)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
