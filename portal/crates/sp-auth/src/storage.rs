//! Persisted key/value state that survives restarts.
//!
//! Values are opaque JSON documents addressed by a fixed key such as
//! `auth-storage`. `FileStorage` keeps one `<key>.json` file per entry;
//! `MemoryStorage` backs tests and ephemeral sessions.

use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{debug, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> AuthErrorResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AuthErrorResult<()>;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> AuthErrorResult<()>;

    /// Move an unreadable entry aside so it can be inspected later.
    fn quarantine(&self, key: &str) -> AuthErrorResult<()> {
        self.remove(key)
    }
}

/// Directory-backed storage using atomic writes.
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

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> AuthErrorResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AuthError::storage_io(path, e))
    }

    /// Writes to a temp file, syncs, then renames over the final path.
    fn set(&self, key: &str, value: &str) -> AuthErrorResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| AuthError::storage_io(self.dir.clone(), e))?;

        let final_path = self.path_for(key);
        let temp_path = self
            .dir
            .join(format!("{key}.json.tmp.{}", std::process::id()));

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| AuthError::storage_io(temp_path.clone(), e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| AuthError::storage_io(temp_path.clone(), e))?;
            file.sync_all()
                .map_err(|e| AuthError::storage_io(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AuthError::storage_io(final_path.clone(), e)
        })?;

        debug!("Persisted {key} to {}", final_path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthErrorResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| AuthError::storage_io(path.clone(), e))?;
            debug!("Removed {}", path.display());
        }
        Ok(())
    }

    /// Renames `<key>.json` to `<key>.json.corrupted.<timestamp>`.
    fn quarantine(&self, key: &str) -> AuthErrorResult<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self.dir.join(format!("{key}.json.corrupted.{timestamp}"));

        fs::rename(&path, &backup_path).map_err(|e| AuthError::storage_io(path.clone(), e))?;

        warn!("Backed up corrupted {key} to {}", backup_path.display());
        Ok(())
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> AuthErrorResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AuthErrorResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthErrorResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}
