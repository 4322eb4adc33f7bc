//! Format selection and the handler trait

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::handlers::{CsvHandler, JsonHandler, XmlHandler, YamlHandler};

/// Supported document formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Xml,
    Yaml,
    Csv,
}

static JSON: JsonHandler = JsonHandler;
static XML: XmlHandler = XmlHandler;
static YAML: YamlHandler = YamlHandler;
static CSV: CsvHandler = CsvHandler;

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 4] = [Self::Json, Self::Xml, Self::Yaml, Self::Csv];

    /// Detect format from a file extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "yml" | "yaml" => Some(Self::Yaml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// The file extension for stored items, including the leading dot
    pub fn extension(&self) -> &'static str {
        self.handler().extension()
    }

    /// The handler implementing this format
    pub fn handler(&self) -> &'static dyn FormatHandler {
        match self {
            Self::Json => &JSON,
            Self::Xml => &XML,
            Self::Yaml => &YAML,
            Self::Csv => &CSV,
        }
    }

    /// Encode a value with this format's handler
    pub fn encode(&self, value: &Value) -> Result<String> {
        let encoded = self.handler().encode(value)?;
        tracing::trace!(format = %self, bytes = encoded.len(), "Encoded value");
        Ok(encoded)
    }

    /// Decode text with this format's handler
    pub fn decode(&self, source: &str) -> Result<Value> {
        tracing::trace!(format = %self, bytes = source.len(), "Decoding value");
        self.handler().decode(source)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s).ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

/// Trait for format-specific handlers
///
/// Handlers are stateless: no I/O and no shared mutable state between calls.
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// File extension including the leading dot, e.g. `.json`
    fn extension(&self) -> &'static str;

    /// Encode a structured value to text
    fn encode(&self, value: &Value) -> Result<String>;

    /// Decode text back into a structured value
    fn decode(&self, source: &str) -> Result<Value>;
}
