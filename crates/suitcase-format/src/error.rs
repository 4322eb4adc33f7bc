//! Error types for suitcase-format

use crate::format::Format;

/// Result type for suitcase-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error encoding {format} data: {cause}")]
    Encode { format: Format, cause: String },

    #[error("Error decoding {format} data: {cause}")]
    Decode { format: Format, cause: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    pub fn encode(format: Format, cause: impl ToString) -> Self {
        Self::Encode {
            format,
            cause: cause.to_string(),
        }
    }

    pub fn decode(format: Format, cause: impl ToString) -> Self {
        Self::Decode {
            format,
            cause: cause.to_string(),
        }
    }

    /// Human-readable summary without the codec diagnostic.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Encode { .. } => "Error encoding data.",
            Self::Decode { .. } => "Error decoding data.",
            Self::UnsupportedFormat(_) => "Unsupported format.",
        }
    }

    /// The underlying codec diagnostic.
    pub fn cause(&self) -> &str {
        match self {
            Self::Encode { cause, .. } | Self::Decode { cause, .. } => cause,
            Self::UnsupportedFormat(name) => name,
        }
    }
}
