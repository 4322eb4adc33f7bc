//! YAML format handler using serde_yaml

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

/// Handler for YAML documents
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn extension(&self) -> &'static str {
        ".yml"
    }

    fn encode(&self, value: &Value) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| Error::encode(Format::Yaml, e))
    }

    fn decode(&self, source: &str) -> Result<Value> {
        serde_yaml::from_str(source).map_err(|e| Error::decode(Format::Yaml, e))
    }
}
