//! Store configuration loading
//!
//! A store can be described by a small file in TOML, JSON, or YAML:
//!
//! ```toml
//! root = "/var/lib/suitcase"
//! format = "yaml"
//! collection = "users"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use suitcase_format::Format;

use crate::error::{Error, Result};

/// Settings for a disk-backed store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory collections live under
    pub root: PathBuf,
    /// Encoding for every item
    #[serde(default)]
    pub format: Format,
    /// Collection selected when the store opens
    #[serde(default)]
    pub collection: Option<String>,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: Format::default(),
            collection: None,
        }
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::Config {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };
        let read = || std::fs::read_to_string(path).map_err(|e| suitcase_fs::Error::io(path, e));

        let config: Self = match extension.as_str() {
            "toml" => toml::from_str(&read()?).map_err(|e| parse_error("TOML", e.to_string()))?,
            "json" => {
                serde_json::from_str(&read()?).map_err(|e| parse_error("JSON", e.to_string()))?
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&read()?).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => return Err(Error::UnsupportedConfigFormat { extension }),
        };

        tracing::debug!(path = %path.display(), root = %config.root.display(), format = %config.format, "Loaded store config");
        Ok(config)
    }
}
