//! The filesystem capability set consumed by the store

use std::sync::Arc;

use crate::{NormalizedPath, Result};

/// One entry returned by [`Filesystem::list_contents`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentEntry {
    /// Full logical path of the entry, e.g. `users/alice.json`.
    pub path: NormalizedPath,
    /// Bare file name with the extension stripped, e.g. `alice`.
    pub filename: String,
}

impl ContentEntry {
    /// Build an entry from its full path, deriving the extension-stripped name.
    pub fn from_path(path: NormalizedPath) -> Self {
        let filename = path.file_stem().unwrap_or_default().to_string();
        Self { path, filename }
    }
}

/// Byte-level persistence primitives.
///
/// Implementations signal failure two ways, mirroring common storage
/// adapters: a typed [`crate::Error`] (`FileExists`, `FileNotFound`, I/O)
/// or an `Ok(false)` / `Ok(None)` "did nothing" result. Callers are expected
/// to treat both as failures.
pub trait Filesystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn has(&self, path: &NormalizedPath) -> Result<bool>;

    /// Create a new file. Fails with `FileExists` if the target is present.
    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool>;

    /// Overwrite an existing file. Fails with `FileNotFound` if it is absent.
    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool>;

    /// Read a file's bytes. Fails with `FileNotFound` if it is absent.
    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>>;

    /// Delete a file. Fails with `FileNotFound` if it is absent.
    fn delete(&self, path: &NormalizedPath) -> Result<bool>;

    /// Recursively delete a directory and everything below it.
    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool>;

    /// List the files directly inside a directory.
    ///
    /// Every [`ContentEntry::filename`] has its extension stripped. A missing
    /// directory lists as empty.
    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>>;
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    fn has(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).has(path)
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        (**self).write(path, data)
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        (**self).update(path, data)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        (**self).read(path)
    }

    fn delete(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).delete(path)
    }

    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).delete_dir(path)
    }

    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>> {
        (**self).list_contents(path)
    }
}

impl<T: Filesystem + ?Sized> Filesystem for Arc<T> {
    fn has(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).has(path)
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        (**self).write(path, data)
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        (**self).update(path, data)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        (**self).read(path)
    }

    fn delete(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).delete(path)
    }

    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool> {
        (**self).delete_dir(path)
    }

    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>> {
        (**self).list_contents(path)
    }
}
