//! Error types for suitcase-fs

use std::path::PathBuf;

/// Result type for suitcase-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in suitcase-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File already exists at path: {path}")]
    FileExists { path: String },

    #[error("File not found at path: {path}")]
    FileNotFound { path: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("In-memory filesystem lock poisoned")]
    Poisoned,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn file_exists(path: impl ToString) -> Self {
        Self::FileExists {
            path: path.to_string(),
        }
    }

    pub fn file_not_found(path: impl ToString) -> Self {
        Self::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Returns `true` for the "target already exists" signal.
    pub fn is_file_exists(&self) -> bool {
        matches!(self, Self::FileExists { .. })
    }

    /// Returns `true` for the "target is absent" signal.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}
