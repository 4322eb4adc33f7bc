//! Disk-backed filesystem rooted at a directory

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::filesystem::{ContentEntry, Filesystem};
use crate::{Error, NormalizedPath, Result, io};

/// A [`Filesystem`] whose logical paths resolve below a root directory.
///
/// Logical paths are always relative to the root; `..` segments are
/// normalized away before they reach the disk.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: NormalizedPath,
}

impl LocalFilesystem {
    /// Open (creating if necessary) a filesystem rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| Error::io(root, e))?;
        let canonical = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        tracing::debug!(root = %canonical.display(), "Opened local filesystem");
        Ok(Self {
            root: NormalizedPath::new(canonical),
        })
    }

    /// The canonical root directory.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn resolve(&self, path: &NormalizedPath) -> NormalizedPath {
        self.root.join(path.to_relative().as_str())
    }
}

impl Filesystem for LocalFilesystem {
    fn has(&self, path: &NormalizedPath) -> Result<bool> {
        Ok(self.resolve(path).to_native().exists())
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        let target = self.resolve(path);
        io::write_new(&target, data).map_err(|e| match e {
            Error::FileExists { .. } => Error::file_exists(path),
            other => other,
        })?;
        Ok(true)
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        let target = self.resolve(path);
        if !target.to_native().is_file() {
            return Err(Error::file_not_found(path));
        }
        io::write_atomic(&target, data)?;
        Ok(true)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        let target = self.resolve(path);
        match io::read_bytes(&target) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(Error::FileNotFound { .. }) => Err(Error::file_not_found(path)),
            Err(e) => Err(e),
        }
    }

    fn delete(&self, path: &NormalizedPath) -> Result<bool> {
        let native = self.resolve(path).to_native();
        match fs::remove_file(&native) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::file_not_found(path)),
            Err(e) => Err(Error::io(native, e)),
        }
    }

    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool> {
        let target = self.resolve(path);
        // Never remove the root itself
        if target == self.root {
            return Ok(false);
        }
        let native = target.to_native();
        if !native.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&native).map_err(|e| Error::io(native, e))?;
        Ok(true)
    }

    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>> {
        let native = self.resolve(path).to_native();
        let reader = match fs::read_dir(&native) {
            Ok(reader) => reader,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(native, e)),
        };

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Temp files from in-flight atomic writes are dotfiles
            if !file_type.is_file() || name.starts_with('.') {
                continue;
            }
            entries.push(ContentEntry::from_path(path.join(&name)));
        }
        entries.sort();
        Ok(entries)
    }
}
