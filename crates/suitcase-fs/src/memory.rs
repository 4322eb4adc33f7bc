//! In-memory filesystem

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::filesystem::{ContentEntry, Filesystem};
use crate::{Error, NormalizedPath, Result};

/// In-memory, map-based [`Filesystem`].
///
/// Intended for tests and embedding. Directories are implicit: a directory
/// exists while at least one file lives below it.
#[derive(Default)]
pub struct MemoryFilesystem {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFilesystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently held.
    pub fn len(&self) -> usize {
        self.files().map(|files| files.len()).unwrap_or_default()
    }

    /// Returns `true` if no files are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted list of every file path.
    pub fn paths(&self) -> Vec<String> {
        self.files()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn files(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.files.read().map_err(|_| Error::Poisoned)
    }

    fn files_mut(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.files.write().map_err(|_| Error::Poisoned)
    }
}

fn key(path: &NormalizedPath) -> String {
    path.to_relative().as_str().to_string()
}

fn dir_prefix(path: &NormalizedPath) -> String {
    let key = key(path);
    if key.is_empty() { key } else { format!("{key}/") }
}

impl Filesystem for MemoryFilesystem {
    fn has(&self, path: &NormalizedPath) -> Result<bool> {
        let files = self.files()?;
        let prefix = dir_prefix(path);
        Ok(files.contains_key(&key(path)) || files.keys().any(|k| k.starts_with(&prefix)))
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        let mut files = self.files_mut()?;
        let key = key(path);
        if files.contains_key(&key) {
            return Err(Error::file_exists(path));
        }
        files.insert(key, data.to_vec());
        Ok(true)
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        let mut files = self.files_mut()?;
        match files.get_mut(&key(path)) {
            Some(existing) => {
                *existing = data.to_vec();
                Ok(true)
            }
            None => Err(Error::file_not_found(path)),
        }
    }

    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        let files = self.files()?;
        files
            .get(&key(path))
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::file_not_found(path))
    }

    fn delete(&self, path: &NormalizedPath) -> Result<bool> {
        let mut files = self.files_mut()?;
        match files.remove(&key(path)) {
            Some(_) => Ok(true),
            None => Err(Error::file_not_found(path)),
        }
    }

    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool> {
        let prefix = dir_prefix(path);
        if prefix.is_empty() {
            return Ok(false);
        }
        let mut files = self.files_mut()?;
        let before = files.len();
        files.retain(|k, _| !k.starts_with(&prefix));
        Ok(files.len() < before)
    }

    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>> {
        let files = self.files()?;
        let prefix = dir_prefix(path);
        Ok(files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|name| ContentEntry::from_path(path.join(name)))
            .collect())
    }
}

impl std::fmt::Debug for MemoryFilesystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFilesystem")
            .field("file_count", &self.len())
            .finish()
    }
}
