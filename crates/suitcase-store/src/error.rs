//! Error types for suitcase-store

use std::path::PathBuf;

/// Result type for suitcase-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in store operations
///
/// Every failure from the filesystem, whether signalled by an error or by a
/// "did nothing" result, surfaces as one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An item operation ran before a collection was selected.
    #[error("Collection not set.")]
    CollectionNotSet,

    /// A non-destructive collection delete found entries.
    #[error("Collection is not empty: {collection} holds {entries} item(s)")]
    CollectionNotEmpty { collection: String, entries: usize },

    /// An item key that cannot name a file inside its collection.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("{message}")]
    Save {
        message: String,
        cause: Option<String>,
    },

    #[error("{message}")]
    Read {
        message: String,
        cause: Option<String>,
    },

    #[error("{message}")]
    Delete {
        message: String,
        cause: Option<String>,
    },

    #[error(transparent)]
    Format(#[from] suitcase_format::Error),

    #[error("Failed to parse {format} config at {path}: {message}")]
    Config {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedConfigFormat { extension: String },

    #[error("Filesystem unavailable: {0}")]
    Filesystem(#[from] suitcase_fs::Error),
}

/// The kind of an [`Error`], for callers deciding on remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CollectionNotSet,
    CollectionNotEmpty,
    InvalidKey,
    Save,
    Read,
    Delete,
    Format,
    Config,
    Filesystem,
}

impl Error {
    pub(crate) fn save(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::Save {
            message: message.into(),
            cause,
        }
    }

    pub(crate) fn read(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::Read {
            message: message.into(),
            cause,
        }
    }

    pub(crate) fn delete(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::Delete {
            message: message.into(),
            cause,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CollectionNotSet => ErrorKind::CollectionNotSet,
            Self::CollectionNotEmpty { .. } => ErrorKind::CollectionNotEmpty,
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::Save { .. } => ErrorKind::Save,
            Self::Read { .. } => ErrorKind::Read,
            Self::Delete { .. } => ErrorKind::Delete,
            Self::Format(_) => ErrorKind::Format,
            Self::Config { .. } | Self::UnsupportedConfigFormat { .. } => ErrorKind::Config,
            Self::Filesystem(_) => ErrorKind::Filesystem,
        }
    }

    /// Short human-readable description of what failed.
    pub fn message(&self) -> &str {
        match self {
            Self::CollectionNotSet => "Collection not set.",
            Self::CollectionNotEmpty { .. } => "Collection is not empty.",
            Self::InvalidKey { .. } => "Invalid key.",
            Self::Save { message, .. }
            | Self::Read { message, .. }
            | Self::Delete { message, .. } => message,
            Self::Format(e) => e.message(),
            Self::Config { .. } | Self::UnsupportedConfigFormat { .. } => {
                "Unable to load configuration."
            }
            Self::Filesystem(_) => "Filesystem unavailable.",
        }
    }

    /// The underlying error that caused this one, if any.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Save { cause, .. } | Self::Read { cause, .. } | Self::Delete { cause, .. } => {
                cause.as_deref()
            }
            Self::Format(e) => Some(e.cause()),
            Self::Config { message, .. } => Some(message),
            Self::UnsupportedConfigFormat { extension } => Some(extension),
            Self::InvalidKey { reason, .. } => Some(*reason),
            Self::CollectionNotSet | Self::CollectionNotEmpty { .. } | Self::Filesystem(_) => None,
        }
    }
}
